//! API Routes
//!
//! Configures the Axum router with all lookup service endpoints.

use std::any::Any as PanicPayload;

use axum::{response::IntoResponse, response::Response, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, highlights_handler, stats_handler, AppState};
use crate::error::LookupError;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Panic catcher: reports handler panics as `500 Unexpected server error`
/// - CORS: Allows any origin so browser front ends can call the API
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/achievement", get(highlights_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    LookupError::Unexpected(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::YearCache;
    use crate::service::LookupService;
    use crate::upstream::HighlightSource;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct PanickingSource;

    #[async_trait]
    impl HighlightSource for PanickingSource {
        async fn generate(&self, _year: u32) -> crate::error::Result<String> {
            panic!("source exploded");
        }
    }

    fn create_test_app() -> Router {
        let service = LookupService::new(YearCache::new(100, 300), Arc::new(PanickingSource));
        create_router(AppState::new(service))
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status(create_test_app(), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status(create_test_app(), "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_year_is_bad_request() {
        assert_eq!(
            get_status(create_test_app(), "/api/achievement").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://timeline.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_unexpected_error() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/achievement?year=1969")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Unexpected server error");
    }
}
