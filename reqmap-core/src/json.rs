//! Best-effort JSON decoding for captured request bodies.
//!
//! Request bodies are untrusted input: absent, empty, truncated, or not JSON
//! at all. Callers building a snapshot never want a decode error — they want
//! a value or a documented default. Both helpers here encode that policy.

use serde_json::{Map, Value};

/// Decodes `bytes` into a JSON value.
///
/// Returns `None` for empty or all-whitespace input and for malformed JSON.
pub fn try_parse(bytes: &[u8]) -> Option<Value> {
    if bytes.trim_ascii().is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "body is not valid JSON, skipping decode");
            None
        }
    }
}

/// Decodes `bytes` into a JSON object, or an empty object for any other
/// outcome.
///
/// Non-object shapes (arrays, scalars), malformed JSON, and empty input all
/// yield an empty map, so callers needing "body as object" never branch on
/// decode failure themselves.
pub fn object_or_empty(bytes: &[u8]) -> Map<String, Value> {
    match try_parse(bytes) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
