//! Year Cache Module
//!
//! Year-keyed cache combining HashMap storage with LRU tracking and TTL
//! staleness checks.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheStats, LruTracker, YearEntry, MAX_ITEMS};

/// Largest TTL representable as a chrono duration
const MAX_TTL_SECS: u64 = (i64::MAX / 1_000) as u64;

// == Year Cache ==
/// Process-wide highlights cache, one entry per year.
#[derive(Debug)]
pub struct YearCache {
    entries: HashMap<u32, YearEntry>,
    lru: LruTracker<u32>,
    stats: CacheStats,
    /// Maximum number of years held at once
    max_entries: usize,
    /// Age after which an entry no longer counts as a hit
    ttl: Duration,
}

impl YearCache {
    // == Constructor ==
    /// Creates a new YearCache.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of years the cache can hold (at least 1)
    /// * `ttl_secs` - Entry lifetime in seconds
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.min(MAX_TTL_SECS) as i64;
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the fresh entry for `year`, recording a hit or a miss.
    ///
    /// A stale entry is removed and counted as a miss.
    pub fn get(&mut self, year: u32) -> Option<YearEntry> {
        match self.fresh(year) {
            Some(entry) => {
                self.stats.record_hit();
                self.lru.touch(&year);
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the fresh entry for `year` without touching statistics.
    pub fn peek(&mut self, year: u32) -> Option<YearEntry> {
        self.fresh(year)
    }

    fn fresh(&mut self, year: u32) -> Option<YearEntry> {
        let entry = self.entries.get(&year)?;
        if entry.is_expired(self.ttl) {
            self.entries.remove(&year);
            self.lru.remove(&year);
            self.stats.set_total_entries(self.entries.len());
            return None;
        }
        Some(entry.clone())
    }

    // == Insert ==
    /// Stores freshly fetched items for `year`, overwriting any prior entry.
    ///
    /// Items beyond `MAX_ITEMS` are dropped. If the cache is at capacity,
    /// the least recently used year is evicted.
    pub fn insert(&mut self, year: u32, items: Vec<String>) -> YearEntry {
        self.insert_entry(YearEntry::new(year, items))
    }

    /// Stores a prebuilt entry; see [`YearCache::insert`].
    pub fn insert_entry(&mut self, mut entry: YearEntry) -> YearEntry {
        entry.items.truncate(MAX_ITEMS);
        let year = entry.year;

        if !self.entries.contains_key(&year) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(year, entry.clone());
        self.lru.touch(&year);
        self.stats.record_refresh();
        self.stats.set_total_entries(self.entries.len());
        entry
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all entries stale at `now`. Returns how many were removed.
    pub fn cleanup_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let expired: Vec<u32> = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(ttl, now))
            .map(|entry| entry.year)
            .collect();

        for year in &expired {
            self.entries.remove(year);
            self.lru.remove(year);
        }

        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    /// Removes all currently stale entries.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
