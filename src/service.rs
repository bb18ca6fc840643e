//! Lookup Service
//!
//! Cache policy in front of the highlight source: serve fresh entries,
//! refresh on miss or when forced, and keep at most one upstream call in
//! flight per year.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, YearCache, YearEntry};
use crate::coerce::coerce_items;
use crate::error::{LookupError, Result};
use crate::upstream::HighlightSource;

// == Lookup Service ==
/// Year lookups backed by a shared [`YearCache`] and a [`HighlightSource`].
///
/// Clones share the same cache, source, and refresh guards.
#[derive(Clone)]
pub struct LookupService {
    cache: Arc<RwLock<YearCache>>,
    source: Arc<dyn HighlightSource>,
    /// Per-year refresh guards; present only while a refresh is pending
    in_flight: Arc<Mutex<HashMap<u32, Arc<Mutex<()>>>>>,
}

impl LookupService {
    pub fn new(cache: YearCache, source: Arc<dyn HighlightSource>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            source,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Shared handle to the cache, used by the cleanup task.
    pub fn cache(&self) -> Arc<RwLock<YearCache>> {
        self.cache.clone()
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Lookup ==
    /// Returns the highlights for `year`.
    ///
    /// Without `force`, a fresh cached entry is returned without contacting
    /// the upstream. Otherwise the upstream is called once, its text coerced
    /// into items, and the result written to the cache. Callers that queue
    /// behind a pending refresh of the same year reuse its result.
    ///
    /// The refresh runs on its own task, so dropping the caller does not
    /// cancel an upstream call already issued; its result is still cached.
    pub async fn lookup(&self, year: u32, force: bool) -> Result<YearEntry> {
        let requested_at = Utc::now();

        if !force {
            let mut cache = self.cache.write().await;
            if let Some(entry) = cache.get(year) {
                debug!(
                    "Cache hit for {} ({}s left)",
                    year,
                    entry.ttl_remaining(cache.ttl()).num_seconds()
                );
                return Ok(entry);
            }
        }

        let service = self.clone();
        let task = tokio::spawn(async move {
            service
                .guarded_refresh(year, force, requested_at)
                .await
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(LookupError::Unexpected(format!("Refresh task failed: {}", e))),
        }
    }

    async fn guarded_refresh(
        &self,
        year: u32,
        force: bool,
        requested_at: DateTime<Utc>,
    ) -> Result<YearEntry> {
        let guard = self.year_guard(year).await;
        let result = {
            let _held = guard.lock().await;
            self.refresh(year, force, requested_at).await
        };
        self.release_year_guard(year, guard).await;

        result
    }

    /// Runs with the year guard held.
    async fn refresh(
        &self,
        year: u32,
        force: bool,
        requested_at: DateTime<Utc>,
    ) -> Result<YearEntry> {
        if let Some(entry) = self.cache.write().await.peek(year) {
            if !force || entry.cached_at >= requested_at {
                debug!("Year {} was refreshed by a concurrent request", year);
                return Ok(entry);
            }
        }

        info!("Fetching highlights for {} (force={})", year, force);
        let raw = self.source.generate(year).await?;

        let items = coerce_items(&raw);
        if items.is_empty() {
            warn!("Upstream text for {} held no usable items", year);
            return Err(LookupError::EmptyContent);
        }

        let entry = self.cache.write().await.insert(year, items);
        info!("Cached {} highlights for {}", entry.items.len(), year);
        Ok(entry)
    }

    async fn year_guard(&self, year: u32) -> Arc<Mutex<()>> {
        self.in_flight
            .lock()
            .await
            .entry(year)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the year's guard from the map once no other caller holds it.
    async fn release_year_guard(&self, year: u32, guard: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // One reference in the map, one here.
        if Arc::strong_count(&guard) == 2 {
            in_flight.remove(&year);
        }
    }

    #[cfg(test)]
    async fn pending_guards(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
