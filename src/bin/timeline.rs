//! Terminal timeline card
//!
//! Line-oriented stand-in for the swipeable card: shows one year at a
//! time and moves through 1800-2025 on `p`/`n`, a typed year, or `r` to
//! request the current year again. Key names such as `Home` and `End`
//! also work. `q` quits.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeline_highlights::client::{
    FetchClient, FetchSnapshot, FetchStatus, HttpLookupApi, Navigation, Timeline,
};

const DEFAULT_LOOKUP_URL: &str = "http://localhost:3000";

enum Command {
    Navigate(Navigation),
    Reload,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "p" | "prev" => Some(Command::Navigate(Navigation::Previous)),
        "n" | "next" | "" => Some(Command::Navigate(Navigation::Next)),
        "r" | "reload" => Some(Command::Reload),
        "q" | "quit" => Some(Command::Quit),
        other => Navigation::from_key(other)
            .or_else(|| other.parse().ok().map(Navigation::Jump))
            .map(Command::Navigate),
    }
}

fn render(timeline: &Timeline, snapshot: &FetchSnapshot) {
    let (position, total) = timeline.position();
    println!();
    println!("== {} ({}/{}) ==", timeline.year(), position, total);
    match snapshot.status {
        FetchStatus::Idle | FetchStatus::Loading => println!("  loading..."),
        FetchStatus::Error => println!("  Could not load highlights for this year."),
        FetchStatus::Success if snapshot.items.is_empty() => println!("  Nothing found."),
        FetchStatus::Success => {
            for item in &snapshot.items {
                println!("  • {}", item);
            }
        }
    }
    println!("[p]rev  [n]ext  <year>  Home/End  [r]eload  [q]uit");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeline_highlights=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = std::env::var("LOOKUP_URL").unwrap_or_else(|_| DEFAULT_LOOKUP_URL.to_string());
    let client = FetchClient::new(HttpLookupApi::new(base_url));
    let mut timeline = Timeline::default();

    let snapshot = client.request_items_for_year(timeline.year()).await;
    render(&timeline, &snapshot);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let changed = match parse_command(&line) {
            Some(Command::Navigate(navigation)) => timeline.apply(navigation),
            Some(Command::Reload) => true,
            Some(Command::Quit) => break,
            None => {
                println!("Unknown command: {}", line.trim());
                continue;
            }
        };

        if changed {
            let snapshot = client.request_items_for_year(timeline.year()).await;
            render(&timeline, &snapshot);
        }
    }

    Ok(())
}
