//! Year Entry Module
//!
//! Defines the cached highlights for a single year.

use chrono::{DateTime, Duration, Utc};

// == Year Entry ==
/// Highlights cached for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEntry {
    /// The year the items describe
    pub year: u32,
    /// Normalized highlight strings, at most `MAX_ITEMS`
    pub items: Vec<String>,
    /// When the upstream refresh that produced the items completed
    pub cached_at: DateTime<Utc>,
}

impl YearEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(year: u32, items: Vec<String>) -> Self {
        Self::at(year, items, Utc::now())
    }

    /// Creates a new entry with an explicit timestamp.
    pub fn at(year: u32, items: Vec<String>, cached_at: DateTime<Utc>) -> Self {
        Self {
            year,
            items,
            cached_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.cached_at >= ttl
    }

    /// Checks if the entry is older than `ttl` right now.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, Utc::now())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        let age = Utc::now() - self.cached_at;
        (ttl - age).max(Duration::zero())
    }
}
