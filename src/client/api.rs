//! Lookup service binding used by the fetch client.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;
use crate::models::HighlightsResponse;

/// Anything that can answer "highlights for year Y".
#[async_trait]
pub trait LookupApi: Send + Sync {
    async fn fetch_year(&self, year: u32) -> Result<Vec<String>, FetchError>;
}

/// Calls `GET {base_url}/api/achievement?year=Y`.
#[derive(Debug, Clone)]
pub struct HttpLookupApi {
    base_url: String,
    client: Client,
}

impl HttpLookupApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LookupApi for HttpLookupApi {
    async fn fetch_year(&self, year: u32) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(format!("{}/api/achievement", self.base_url))
            .query(&[("year", year)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: HighlightsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(body.items)
    }
}
