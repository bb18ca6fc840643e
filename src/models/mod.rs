//! Request and Response models for the lookup service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{parse_force, parse_year, LookupQuery};
pub use responses::{ErrorResponse, HealthResponse, HighlightsResponse, StatsResponse};
