//! Client Module
//!
//! The presentation-side half: a fetch client with its own year cache, the
//! HTTP binding to the lookup service, and the year navigator.

mod api;
mod fetcher;
mod timeline;

pub use api::{HttpLookupApi, LookupApi};
pub use fetcher::{FetchClient, FetchSnapshot, FetchStatus};
pub use timeline::{Navigation, Timeline, FIRST_YEAR, LAST_YEAR};
