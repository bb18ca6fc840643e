//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle of the lookup API against a
//! scripted highlight source, plus the fetch client against a live server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use timeline_highlights::{
    api::{create_router, HIGHLIGHTS_CACHE_CONTROL},
    cache::YearCache,
    client::{FetchClient, FetchStatus, HttpLookupApi},
    config::API_KEY_ENV,
    error::{LookupError, Result},
    upstream::{GeminiSource, HighlightSource},
    AppState, LookupService,
};

// == Helper Types ==

/// Replies with a fixed text and counts upstream calls.
struct ScriptedSource {
    reply: std::result::Result<String, fn() -> LookupError>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(err: fn() -> LookupError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HighlightSource for ScriptedSource {
    async fn generate(&self, year: u32) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.reply {
            Ok(text) => Ok(text
                .replace("{year}", &year.to_string())
                .replace("{n}", &n.to_string())),
            Err(err) => Err(err()),
        }
    }
}

// == Helper Functions ==

fn app_with(source: Arc<ScriptedSource>) -> Router {
    let service = LookupService::new(YearCache::new(100, 300), source);
    create_router(AppState::new(service))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, cache_control, serde_json::from_slice(&bytes).unwrap())
}

// == Highlights Endpoint Tests ==

#[tokio::test]
async fn test_lookup_success() {
    let source = ScriptedSource::text(r#"["{year} first", "{year} second"]"#);
    let app = app_with(source.clone());

    let (status, cache_control, json) = get(&app, "/api/achievement?year=1969").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some(HIGHLIGHTS_CACHE_CONTROL));
    assert_eq!(json["year"], 1969);
    assert_eq!(json["items"], serde_json::json!(["1969 first", "1969 second"]));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_second_lookup_served_from_cache() {
    let source = ScriptedSource::text(r#"["call {n}"]"#);
    let app = app_with(source.clone());

    let (_, _, first) = get(&app, "/api/achievement?year=1989").await;
    let (status, _, second) = get(&app, "/api/achievement?year=1989").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_force_refreshes_and_overwrites() {
    let source = ScriptedSource::text(r#"["call {n}"]"#);
    let app = app_with(source.clone());

    get(&app, "/api/achievement?year=1989").await;
    let (_, _, forced) = get(&app, "/api/achievement?year=1989&force=1").await;
    let (_, _, after) = get(&app, "/api/achievement?year=1989").await;
    let (_, _, forced_again) = get(&app, "/api/achievement?year=1989&force=true").await;

    assert_eq!(forced["items"][0], "call 2");
    assert_eq!(after["items"][0], "call 2");
    assert_eq!(forced_again["items"][0], "call 3");
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_force_zero_uses_cache() {
    let source = ScriptedSource::text(r#"["call {n}"]"#);
    let app = app_with(source.clone());

    get(&app, "/api/achievement?year=1989").await;
    let (_, _, json) = get(&app, "/api/achievement?year=1989&force=0").await;

    assert_eq!(json["items"][0], "call 1");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_invalid_years_never_reach_upstream() {
    let source = ScriptedSource::text(r#"["x"]"#);
    let app = app_with(source.clone());

    for uri in [
        "/api/achievement",
        "/api/achievement?year=",
        "/api/achievement?year=-1",
        "/api/achievement?year=abc",
        "/api/achievement?year=19.5",
        "/api/achievement?force=1",
    ] {
        let (status, _, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(json["error"], "Invalid or missing year");
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_line_fallback_and_truncation() {
    let source = ScriptedSource::text("1. One\n2. Two\n3. Three\n4. Four\n5. Five\n6. Six\n7. Seven");
    let app = app_with(source);

    let (status, _, json) = get(&app, "/api/achievement?year=1900").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["items"],
        serde_json::json!(["One", "Two", "Three", "Four", "Five"])
    );
}

#[tokio::test]
async fn test_empty_content_is_bad_gateway_and_not_cached() {
    let source = ScriptedSource::text("[]");
    let app = app_with(source.clone());

    let (status, cache_control, json) = get(&app, "/api/achievement?year=1900").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Empty content");
    assert!(cache_control.is_none());

    get(&app, "/api/achievement?year=1900").await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_no_content_is_bad_gateway() {
    let source = ScriptedSource::failing(|| LookupError::NoContent);
    let app = app_with(source.clone());

    let (status, _, json) = get(&app, "/api/achievement?year=1900").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "No content returned");

    let (_, _, stats) = get(&app, "/stats").await;
    assert_eq!(stats["total_entries"], 0);
}

#[tokio::test]
async fn test_upstream_error_detail() {
    let source = ScriptedSource::failing(|| LookupError::upstream("HTTP 429: Quota exceeded"));
    let app = app_with(source);

    let (status, _, json) = get(&app, "/api/achievement?year=1900").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Upstream error");
    assert_eq!(json["detail"], "HTTP 429: Quota exceeded");
}

#[tokio::test]
async fn test_missing_credential_is_server_error() {
    let source = Arc::new(GeminiSource::new(None, "test-model", "http://127.0.0.1:1"));
    let service = LookupService::new(YearCache::new(100, 300), source);
    let app = create_router(AppState::new(service));

    let (status, _, json) = get(&app, "/api/achievement?year=1969").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], format!("Server missing {}", API_KEY_ENV));
}

// == Stats & Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let source = ScriptedSource::text(r#"["x"]"#);
    let app = app_with(source);

    get(&app, "/api/achievement?year=1969").await;
    get(&app, "/api/achievement?year=1969").await;
    let (status, _, json) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["refreshes"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with(ScriptedSource::text("[]"));

    let (status, _, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == Fetch Client Against A Live Server ==

#[tokio::test]
async fn test_fetch_client_end_to_end() {
    let source = ScriptedSource::text(r#"["{year} highlight"]"#);
    let app = app_with(source.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = FetchClient::new(HttpLookupApi::new(format!("http://{}", addr)));

    let snapshot = client.request_items_for_year(1903).await;
    assert_eq!(snapshot.status, FetchStatus::Success);
    assert_eq!(snapshot.items, vec!["1903 highlight"]);

    // Served from the client cache without touching the server
    client.request_items_for_year(1904).await;
    let snapshot = client.request_items_for_year(1903).await;
    assert_eq!(snapshot.items, vec!["1903 highlight"]);
    assert_eq!(source.calls(), 2);

    server.abort();
}

#[tokio::test]
async fn test_fetch_client_error_state() {
    let source = ScriptedSource::failing(|| LookupError::EmptyContent);
    let app = app_with(source);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = FetchClient::new(HttpLookupApi::new(format!("http://{}", addr)));
    let snapshot = client.request_items_for_year(1850).await;

    assert_eq!(snapshot.status, FetchStatus::Error);
    assert!(snapshot.items.is_empty());

    server.abort();
}
