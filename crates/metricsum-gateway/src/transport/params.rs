//! `value` field extraction for metric writes.
//!
//! The field is looked up in the query string first, then the body. A JSON
//! body is used when the content type says so, anything else is read as
//! `application/x-www-form-urlencoded`. Bodies that fail to parse count as
//! carrying no `value`.

use serde_json::{Map, Value};

use metricsum_core::error::{MetricError, Result};

const FIELD: &str = "value";

/// Find and parse the `value` field of a metric write.
pub fn extract_value(query: Option<&str>, content_type: Option<&str>, body: &[u8]) -> Result<i64> {
    let raw = query
        .and_then(from_form_str)
        .or_else(|| from_body(content_type, body))
        .ok_or(MetricError::MissingValue)?;
    parse_value(&raw)
}

/// Decimal integer with an optional sign. No whitespace, no fraction.
pub fn parse_value(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| MetricError::NonNumericValue(raw.to_string()))
}

fn from_form_str(s: &str) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(s).ok()?;
    first_value(pairs)
}

fn from_body(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    if content_type.is_some_and(is_json) {
        let obj: Map<String, Value> = serde_json::from_slice(body).ok()?;
        return match obj.get(FIELD)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
    }
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).ok()?;
    first_value(pairs)
}

fn first_value(pairs: Vec<(String, String)>) -> Option<String> {
    pairs.into_iter().find(|(k, _)| k == FIELD).map(|(_, v)| v)
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|m| m.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
