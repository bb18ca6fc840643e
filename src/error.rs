//! Error types for the lookup service and fetch client
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Lookup Error Enum ==
/// Failures of a year lookup, mapped onto HTTP responses by the API layer.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Year parameter missing or not a non-negative integer
    #[error("Invalid or missing year")]
    InvalidYear,

    /// Upstream credential is not configured; names the variable
    #[error("Server missing {0}")]
    MissingCredential(String),

    /// Upstream call failed or answered with a non-success status
    #[error("Upstream error")]
    Upstream {
        /// Best-effort diagnostic from the upstream response
        detail: Option<String>,
    },

    /// Upstream answered without any usable text
    #[error("No content returned")]
    NoContent,

    /// Upstream text produced no items after coercion
    #[error("Empty content")]
    EmptyContent,

    /// Anything else; the message is logged but never returned to callers
    #[error("Unexpected server error")]
    Unexpected(String),
}

impl LookupError {
    /// Builds an upstream failure carrying a diagnostic detail.
    pub fn upstream(detail: impl Into<String>) -> Self {
        LookupError::Upstream {
            detail: Some(detail.into()),
        }
    }

    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidYear => StatusCode::BAD_REQUEST,
            LookupError::MissingCredential(_) | LookupError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            LookupError::Upstream { .. } | LookupError::NoContent | LookupError::EmptyContent => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            LookupError::Upstream { detail } => {
                ErrorResponse::with_detail(self.to_string(), detail.clone())
            }
            LookupError::Unexpected(msg) => {
                error!("Unexpected server error: {}", msg);
                ErrorResponse::new(self.to_string())
            }
            _ => ErrorResponse::new(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, LookupError>;

// == Fetch Error Enum ==
/// Failures seen by the fetch client when calling the lookup service.
///
/// The client collapses every variant into a single error display state;
/// the variants only exist for logging.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Lookup service returned status {0}")]
    Status(u16),

    /// The response body was not a highlights payload
    #[error("Could not decode response: {0}")]
    Decode(String),
}
