//! Cache Module
//!
//! Process-wide year cache with TTL staleness and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::YearEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::YearCache;

// == Public Constants ==
/// Default time-to-live of a cached year (7 days)
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Maximum number of items kept per year
pub const MAX_ITEMS: usize = 5;
