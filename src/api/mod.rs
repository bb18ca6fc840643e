//! API Module
//!
//! HTTP handlers and routing for the highlights lookup API.
//!
//! # Endpoints
//! - `GET /api/achievement?year=<int>&force=<0|1|true|false>` - Highlights for a year
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
