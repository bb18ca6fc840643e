//! Response Coercion
//!
//! Turns free-form model output into a short list of clean highlight
//! strings. Strategies are tried in order:
//!
//! 1. the whole text is a JSON array
//! 2. the text embeds a JSON array (the first `[` that starts one)
//! 3. the text is split on line breaks and bullet/dash markers
//!
//! Whatever the strategy, at most [`MAX_ITEMS`] items are returned.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::cache::MAX_ITEMS;

/// Fragments kept by the line-splitting fallback before final truncation
pub const MAX_FALLBACK_FRAGMENTS: usize = 10;

/// Leading enumeration marker: `1.`, `2)`, `-`, `*`, `•`, en/em dash.
///
/// A numeric marker must be followed by whitespace, the end, or a letter
/// (captured so it can be put back). A digit after the period is not a
/// marker, which keeps `3.5 million` intact.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+[.)](?:\s+|$|(\p{L}))|[-*•–—]\s*)").expect("marker regex")
});

/// Line breaks, bullets, and dashes used as separators mid-line.
static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n|•|\s+[-–—]\s+").expect("split regex"));

// == Coerce ==
/// Extracts up to [`MAX_ITEMS`] normalized strings from upstream text.
///
/// An empty result means the text held no usable content.
pub fn coerce_items(raw: &str) -> Vec<String> {
    let mut items = parse_array(raw.trim())
        .or_else(|| find_embedded_array(raw))
        .unwrap_or_else(|| split_fragments(raw));

    items.truncate(MAX_ITEMS);
    items
}

// == Normalize ==
/// Strips one leading enumeration marker and surrounding whitespace.
pub fn normalize_item(item: &str) -> String {
    MARKER_RE.replace(item, "${1}").trim().to_string()
}

/// Returns the normalized string elements if `text` is a JSON array.
///
/// Non-string elements are skipped. An array is final even if nothing
/// survives filtering.
fn parse_array(text: &str) -> Option<Vec<String>> {
    array_items(serde_json::from_str::<Value>(text).ok()?)
}

/// Scans each `[` in order for the first one that opens a complete JSON
/// array. Text after the array is ignored.
fn find_embedded_array(raw: &str) -> Option<Vec<String>> {
    raw.match_indices('[').find_map(|(start, _)| {
        let value = serde_json::Deserializer::from_str(&raw[start..])
            .into_iter::<Value>()
            .next()?
            .ok()?;
        array_items(value)
    })
}

fn array_items(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(values) => Some(
            values
                .iter()
                .filter_map(Value::as_str)
                .map(normalize_item)
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

fn split_fragments(raw: &str) -> Vec<String> {
    SPLIT_RE
        .split(raw)
        .map(normalize_item)
        .filter(|item| !item.is_empty())
        .take(MAX_FALLBACK_FRAGMENTS)
        .collect()
}
