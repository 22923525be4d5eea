//! Turns a raw export string into an ordered sequence of email records.
//!
//! Exports arrive in several shapes: a JSON array, a single JSON object, a
//! concatenation of objects separated by `Value #N:` markers, or free text
//! with embedded JSON fragments. Structured parsing is tried first; the
//! fallbacks recover what they can, skipping malformed segments with a
//! warning instead of failing the batch.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::InputError;
use crate::models::EmailRecord;

lazy_static! {
    /// Segment delimiter used by the export tool: `Value #N:` on its own
    /// line, surrounded by blank lines.
    static ref VALUE_MARKER: Regex = Regex::new(r"\n\s*Value #\d+:\s*\n").unwrap();
}

/// Parse a raw export string into email records.
///
/// Returns [`InputError`] only when no record can be recovered at all;
/// individually malformed segments are skipped with a warning.
pub fn parse_emails(input: &str) -> Result<Vec<EmailRecord>, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::NoRecords);
    }

    // Structured parse first: a JSON array or a single object.
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(values)) => {
            let records = records_from_values(values);
            if records.is_empty() {
                return Err(InputError::NoRecords);
            }
            return Ok(records);
        }
        Ok(value @ Value::Object(_)) => {
            let records = records_from_values(vec![value]);
            if records.is_empty() {
                return Err(InputError::NoRecords);
            }
            return Ok(records);
        }
        Ok(other) => {
            warn!("export parsed as JSON {} instead of array/object", json_kind(&other));
            return Err(InputError::Json(format!(
                "expected a JSON array or object, got {}",
                json_kind(&other)
            )));
        }
        Err(err) => {
            debug!("structured JSON parse failed ({err}), trying segment fallback");
            parse_segments(trimmed, err)
        }
    }
}

/// Fallback path: split on `Value #N:` markers and parse each segment,
/// recovering embedded `{...}` fragments where a segment is not bare JSON.
fn parse_segments(input: &str, json_err: serde_json::Error) -> Result<Vec<EmailRecord>, InputError> {
    let mut records = Vec::new();

    for segment in VALUE_MARKER.split(input) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let fragment = if segment.starts_with('{') && segment.ends_with('}') {
            segment
        } else {
            // The first segment often carries prefix text before the JSON.
            match embedded_object(segment) {
                Some(fragment) => fragment,
                None => {
                    warn!("skipping segment with no JSON object ({} bytes)", segment.len());
                    continue;
                }
            }
        };

        match serde_json::from_str::<EmailRecord>(fragment) {
            Ok(record) => records.push(record),
            Err(err) => warn!("skipping malformed segment: {err}"),
        }
    }

    if records.is_empty() {
        return Err(InputError::Json(json_err.to_string()));
    }

    debug!("recovered {} records from segmented export", records.len());
    Ok(records)
}

/// Convert parsed JSON values into records. Array elements may themselves be
/// JSON strings containing an object; anything else is skipped with a
/// warning.
fn records_from_values(values: Vec<Value>) -> Vec<EmailRecord> {
    let mut records = Vec::new();

    for (i, value) in values.into_iter().enumerate() {
        match value {
            Value::Object(_) => match serde_json::from_value::<EmailRecord>(value) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping element {}: {err}", i + 1),
            },
            Value::String(inner) => match serde_json::from_str::<EmailRecord>(&inner) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping string element {}: {err}", i + 1),
            },
            other => warn!("skipping element {}: JSON {}", i + 1, json_kind(&other)),
        }
    }

    records
}

/// Locate a trailing `{...}` fragment inside free text.
fn embedded_object(segment: &str) -> Option<&str> {
    let start = segment.find('{')?;
    let fragment = &segment[start..];
    fragment.ends_with('}').then_some(fragment)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_json_array() {
        let input = r#"[{"id": "1", "body": "Totalt 100 kr"}, {"id": "2", "body": "Totalt 50 kr"}]"#;
        let records = parse_emails(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].body, "Totalt 50 kr");
    }

    #[test]
    fn test_parse_single_object() {
        let records = parse_emails(r#"{"body": "Totalt 100 kr"}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_array_of_json_strings() {
        let input = r#"["{\"body\": \"Totalt 100 kr\"}", "{\"body\": \"Totalt 50 kr\"}"]"#;
        let records = parse_emails(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].body, "Totalt 100 kr");
    }

    #[test]
    fn test_parse_value_marker_segments() {
        let input = "{\"id\": \"1\", \"body\": \"a\"}\n\nValue #2:\n\n{\"id\": \"2\", \"body\": \"b\"}\n\nValue #3:\n\n{\"id\": \"3\", \"body\": \"c\"}";
        let records = parse_emails(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].body, "c");
    }

    #[test]
    fn test_segment_with_prefix_text() {
        let input = "Export from 2025-07-01\n{\"body\": \"a\"}\n\nValue #2:\n\n{\"body\": \"b\"}";
        let records = parse_emails(input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_malformed_segment_skipped() {
        let input = "{\"body\": \"a\"}\n\nValue #2:\n\n{not json at all\n\nValue #3:\n\n{\"body\": \"c\"}";
        let records = parse_emails(input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_total_garbage_is_fatal() {
        assert!(matches!(parse_emails("not json, no markers"), Err(InputError::Json(_))));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(parse_emails("   \n "), Err(InputError::NoRecords)));
    }

    #[test]
    fn test_scalar_json_is_fatal() {
        assert!(matches!(parse_emails("42"), Err(InputError::Json(_))));
    }

    #[test]
    fn test_empty_array_is_no_records() {
        assert!(matches!(parse_emails("[]"), Err(InputError::NoRecords)));
    }
}
