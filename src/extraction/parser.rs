//! Best-effort recovery of a JSON payload from a free-text model reply.

use crate::models::ExtractionOutcome;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_JSON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("Failed to compile fenced JSON regex")
});

// Greedy: first '{' through last '}'
static BRACE_SPAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("Failed to compile brace span regex"));

/// Parse a model reply into an extraction outcome.
///
/// 1. A ```` ```json ```` fenced block, if present, is the payload.
/// 2. Otherwise the widest `{ ... }` span is the payload.
/// 3. Otherwise, or if the chosen payload is not valid JSON, the reply is kept
///    as a failure record. There is no fallback from step 1 to step 2.
pub fn parse_response(raw: &str) -> ExtractionOutcome {
    let candidate = FENCED_JSON_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .or_else(|| BRACE_SPAN_REGEX.find(raw))
        .map(|m| m.as_str());

    let Some(candidate) = candidate else {
        tracing::warn!("No JSON found in model response");
        return ExtractionOutcome::parse_failure(raw);
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => ExtractionOutcome::Parsed(value),
        Err(e) => {
            tracing::warn!("Model response held malformed JSON: {}", e);
            ExtractionOutcome::parse_failure(raw)
        }
    }
}
