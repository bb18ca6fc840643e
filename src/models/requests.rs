//! Request DTOs for the lookup service API
//!
//! Defines the query parameters accepted by the highlights endpoint.

use serde::Deserialize;

use crate::error::{LookupError, Result};

/// Query string for `GET /api/achievement`
///
/// Both fields are kept as raw text so that malformed values reach
/// validation instead of being rejected by the extractor.
///
/// # Fields
/// - `year`: The year to look up
/// - `force`: `1`/`true` bypasses the server cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    /// Raw year parameter
    #[serde(default)]
    pub year: Option<String>,
    /// Raw force flag
    #[serde(default)]
    pub force: Option<String>,
}

impl LookupQuery {
    /// Validates the query and returns `(year, force)`.
    pub fn validate(&self) -> Result<(u32, bool)> {
        let year = parse_year(self.year.as_deref())?;
        Ok((year, parse_force(self.force.as_deref())))
    }
}

/// Parses a year parameter as a finite, non-negative integer.
///
/// Integral numeric text such as `"1969.0"` or `"2e3"` is accepted;
/// missing, empty, negative, fractional and non-numeric input is not.
pub fn parse_year(raw: Option<&str>) -> Result<u32> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or(LookupError::InvalidYear)?;

    if let Ok(year) = raw.parse::<u32>() {
        return Ok(year);
    }

    let value: f64 = raw.parse().map_err(|_| LookupError::InvalidYear)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(LookupError::InvalidYear);
    }
    Ok(value as u32)
}

/// Parses the force flag; only `1` and `true` (any case) enable it.
pub fn parse_force(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}
