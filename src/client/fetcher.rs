//! Fetch Client
//!
//! Resolves the items to display for the selected year. Years already
//! fetched in this client's lifetime are answered from a local cache;
//! everything else goes to the lookup service. Each request carries the
//! generation of the year selection that started it, and a response whose
//! generation is no longer current is dropped.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::api::LookupApi;

/// Display state of the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Error,
    Success,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSnapshot {
    /// Selected year, `None` before the first request
    pub year: Option<u32>,
    pub status: FetchStatus,
    pub items: Vec<String>,
}

#[derive(Debug)]
struct ClientState {
    year: Option<u32>,
    generation: u64,
    status: FetchStatus,
    items: Vec<String>,
    cache: HashMap<u32, Vec<String>>,
}

impl ClientState {
    fn snapshot(&self) -> FetchSnapshot {
        FetchSnapshot {
            year: self.year,
            status: self.status,
            items: self.items.clone(),
        }
    }
}

pub struct FetchClient<A> {
    api: A,
    state: Mutex<ClientState>,
}

impl<A: LookupApi> FetchClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(ClientState {
                year: None,
                generation: 0,
                status: FetchStatus::Idle,
                items: Vec::new(),
                cache: HashMap::new(),
            }),
        }
    }

    pub async fn snapshot(&self) -> FetchSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Items cached locally for `year`, if any.
    pub async fn cached(&self, year: u32) -> Option<Vec<String>> {
        self.state.lock().await.cache.get(&year).cloned()
    }

    /// Selects `year` and resolves its items.
    ///
    /// A non-empty local entry is used without calling the service.
    /// Otherwise the state goes to `Loading` until the service answers.
    /// If another year was selected meanwhile, the answer is discarded and
    /// the returned snapshot describes the newer selection instead.
    pub async fn request_items_for_year(&self, year: u32) -> FetchSnapshot {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.year = Some(year);

            let cached = state.cache.get(&year).filter(|items| !items.is_empty()).cloned();
            if let Some(items) = cached {
                state.status = FetchStatus::Success;
                state.items = items;
                return state.snapshot();
            }

            state.status = FetchStatus::Loading;
            state.items.clear();
            state.generation
        };

        let result = self.api.fetch_year(year).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!("Discarding stale response for {}", year);
            return state.snapshot();
        }

        match result {
            Ok(items) => {
                state.cache.insert(year, items.clone());
                state.status = FetchStatus::Success;
                state.items = items;
            }
            Err(e) => {
                warn!("Lookup for {} failed: {}", year, e);
                state.status = FetchStatus::Error;
                state.items.clear();
            }
        }
        state.snapshot()
    }
}
