//! Prompt template and generation parameters sent upstream.

use serde::Serialize;

/// Sampling settings tuned for short, low-randomness factual lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            max_output_tokens: 256,
        }
    }
}

/// Builds the fixed prompt asking for up to five highlights of `year`.
pub fn build_prompt(year: u32) -> String {
    format!(
        "List notable events, discoveries, and achievements from the year {year}.\n\
         Respond with ONLY a strict JSON array of at most 5 strings.\n\
         Each string must be short (16 words or fewer), factual, and specific to {year}.\n\
         Do not number the items, do not add bullets, and do not add any text before or after the array."
    )
}
