//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_TTL_SECS;
use crate::upstream::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};

/// Environment variable holding the upstream API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of a cached year in seconds
    pub cache_ttl: u64,
    /// Maximum number of years the cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Upstream API key; lookups that need the upstream fail without it
    pub gemini_api_key: Option<String>,
    /// Upstream model name
    pub gemini_model: String,
    /// Upstream REST base URL
    pub gemini_api_base: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("cache_ttl", &self.cache_ttl)
            .field("max_entries", &self.max_entries)
            .field("cleanup_interval", &self.cleanup_interval)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .finish()
    }
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_SECS` - Cached year lifetime (default: 604800, 7 days)
    /// - `MAX_ENTRIES` - Maximum cached years (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expired entry sweep in seconds (default: 3600)
    /// - `GEMINI_API_KEY` - Upstream credential (no default)
    /// - `GEMINI_MODEL` - Upstream model (default: gemini-1.5-flash)
    /// - `GEMINI_API_BASE` - Upstream base URL
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            gemini_api_key: non_empty_var(API_KEY_ENV),
            gemini_model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: non_empty_var("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_TTL_SECS,
            max_entries: 1000,
            cleanup_interval: 3600,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
