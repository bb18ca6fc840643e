//! API Handlers
//!
//! HTTP request handlers for each lookup service endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::cache::YearCache;
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::models::{HealthResponse, HighlightsResponse, LookupQuery, StatsResponse};
use crate::service::LookupService;
use crate::upstream::GeminiSource;

/// Cache lifetime advertised to intermediaries on successful lookups.
///
/// Independent of the service's own, longer TTL.
pub const HIGHLIGHTS_CACHE_CONTROL: &str = "public, max-age=0, s-maxage=86400";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LookupService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: LookupService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration, backed by Gemini.
    pub fn from_config(config: &Config) -> Self {
        let cache = YearCache::new(config.max_entries, config.cache_ttl);
        let source = Arc::new(GeminiSource::from_config(config));
        Self::new(LookupService::new(cache, source))
    }
}

/// Handler for GET /api/achievement
///
/// Returns up to five highlights for the requested year.
pub async fn highlights_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<LookupQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| {
        debug!("Rejected lookup query: {}", rejection);
        LookupError::InvalidYear
    })?;
    let (year, force) = query.validate()?;

    let entry = state.service.lookup(year, force).await?;

    Ok((
        [(header::CACHE_CONTROL, HIGHLIGHTS_CACHE_CONTROL)],
        Json(HighlightsResponse::new(entry.year, entry.items)),
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
