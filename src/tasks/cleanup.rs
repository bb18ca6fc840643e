//! TTL Cleanup Task
//!
//! Background task that periodically removes expired years from the cache.
//! Reads already treat stale entries as misses; the sweep only reclaims
//! memory held by years nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::YearCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// # Arguments
/// * `cache` - Shared reference to the year cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps (minimum 1)
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<YearCache>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired years", removed);
            } else {
                debug!("TTL cleanup: no expired years found");
            }
        }
    })
}
