//! Gemini highlight source.
//!
//! Sends the highlights prompt to `{base}/models/{model}:generateContent`
//! with the API key in the `x-goog-api-key` header, and returns the joined
//! text of the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::{Config, API_KEY_ENV};
use crate::error::{LookupError, Result};

use super::{build_prompt, GenerationParams, HighlightSource};

/// Gemini v1beta REST API base.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Longest upstream error body echoed back as detail.
const MAX_DETAIL_LEN: usize = 500;

pub struct GeminiSource {
    api_key: Option<String>,
    model: String,
    api_base: String,
    params: GenerationParams,
    client: Client,
}

impl std::fmt::Debug for GeminiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSource")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiSource {
    /// Creates a source. A missing key is only reported when a lookup
    /// actually needs the upstream.
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            params: GenerationParams::default(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_api_base.clone(),
        )
    }

    /// Whether an API key is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Builds the `generateContent` body for one year.
    pub fn request_body(&self, year: u32) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(year) }]
            }],
            "generationConfig": self.params
        })
    }

    /// Joins the text parts of the first candidate, skipping thought parts.
    pub fn extract_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Pulls a readable message out of an upstream error body.
    fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from));

        match message {
            Some(message) => format!("HTTP {}: {}", status.as_u16(), message),
            None if body.trim().is_empty() => format!("HTTP {}", status.as_u16()),
            None => {
                let body: String = body.trim().chars().take(MAX_DETAIL_LEN).collect();
                format!("HTTP {}: {}", status.as_u16(), body)
            }
        }
    }
}

#[async_trait]
impl HighlightSource for GeminiSource {
    async fn generate(&self, year: u32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LookupError::MissingCredential(API_KEY_ENV.to_string()))?;

        debug!("Requesting highlights for {} from model {}", year, self.model);

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(year))
            .send()
            .await
            .map_err(|e| LookupError::upstream(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = Self::error_detail(status, &body);
            warn!("Upstream rejected highlights for {}: {}", year, detail);
            return Err(LookupError::upstream(detail));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LookupError::upstream(format!("Invalid response body: {}", e)))?;

        Self::extract_text(&json).ok_or(LookupError::NoContent)
    }
}
