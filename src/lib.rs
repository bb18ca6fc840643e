//! Timeline Highlights - year-by-year highlight lookups
//!
//! A lookup service that asks a generative-text API for up to five short
//! highlights per year, coerces the loosely structured answer into a clean
//! list, and caches it per year; plus the client side that fetches,
//! caches, and navigates years for a timeline card.

pub mod api;
pub mod cache;
pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::LookupService;
pub use tasks::spawn_cleanup_task;
