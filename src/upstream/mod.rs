//! Upstream Module
//!
//! The generative-text collaborator that produces raw highlight text.
//!
//! # Sources
//! - [`GeminiSource`] - Gemini `generateContent` REST API

mod gemini;
mod prompt;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::{GeminiSource, DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
pub use prompt::{build_prompt, GenerationParams};

// == Highlight Source ==
/// Produces raw, loosely structured highlight text for a year.
///
/// Implementations make exactly one upstream call per invocation and never
/// retry. Returned text is non-blank; blank payloads are reported as
/// [`LookupError::NoContent`](crate::error::LookupError::NoContent).
#[async_trait]
pub trait HighlightSource: Send + Sync {
    async fn generate(&self, year: u32) -> Result<String>;
}
