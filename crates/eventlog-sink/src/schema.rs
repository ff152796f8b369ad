//! Event schema for the default sink.
//!
//! An event is a JSON object with:
//! - `tags`: required, a non-empty array of non-empty strings;
//! - `ts`: optional, an RFC 3339 string or non-negative epoch milliseconds;
//! - `data`: optional, any value.
//!
//! Other fields are allowed and passed through.

use chrono::DateTime;
use eventlog_core::error::ValidationError;
use eventlog_core::event::Event;
use serde_json::Value;
use tracing::Level;

/// Check an event against the schema, reporting the first broken rule.
///
/// # Errors
///
/// Returns `ValidationError` naming the offending field.
pub fn validate(event: &Event) -> Result<(), ValidationError> {
    let Some(fields) = event.as_value().as_object() else {
        return Err(ValidationError::new("event must be an object"));
    };

    match fields.get("tags") {
        None | Some(Value::Null) => return Err(ValidationError::new("tags is required")),
        Some(Value::Array(tags)) if is_tag_list(tags) => {}
        Some(_) => {
            return Err(ValidationError::new(
                "tags must be a non-empty array of strings",
            ));
        }
    }

    if let Some(ts) = fields.get("ts") {
        if !is_timestamp(ts) {
            return Err(ValidationError::new(
                "ts must be an RFC 3339 timestamp or epoch milliseconds",
            ));
        }
    }

    Ok(())
}

fn is_tag_list(tags: &[Value]) -> bool {
    !tags.is_empty()
        && tags
            .iter()
            .all(|tag| tag.as_str().is_some_and(|tag| !tag.is_empty()))
}

fn is_timestamp(ts: &Value) -> bool {
    match ts {
        Value::String(text) => DateTime::parse_from_rfc3339(text).is_ok(),
        Value::Number(millis) => millis.as_u64().is_some(),
        _ => false,
    }
}

/// Tags of a valid event. Empty for events that fail `validate`.
#[must_use]
pub fn tags(event: &Event) -> Vec<&str> {
    event
        .field("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Level an event is written at: the most severe level named by a tag,
/// or `INFO` when no tag names one.
#[must_use]
pub fn level(tags: &[&str]) -> Level {
    const SEVERITY: [(&str, Level); 6] = [
        ("error", Level::ERROR),
        ("warn", Level::WARN),
        ("warning", Level::WARN),
        ("info", Level::INFO),
        ("debug", Level::DEBUG),
        ("trace", Level::TRACE),
    ];

    SEVERITY
        .iter()
        .find(|(name, _)| tags.iter().any(|tag| tag.eq_ignore_ascii_case(name)))
        .map_or(Level::INFO, |(_, level)| *level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value) -> Result<(), String> {
        validate(&Event::new(value)).map_err(|e| e.to_string())
    }

    #[test]
    fn test_event_with_tags_and_data_is_valid() {
        assert_eq!(check(json!({ "tags": ["info"], "data": "m" })), Ok(()));
    }

    #[test]
    fn test_data_may_be_any_value_or_absent() {
        assert_eq!(check(json!({ "tags": ["info"], "data": { "i": 3 } })), Ok(()));
        assert_eq!(check(json!({ "tags": ["info"] })), Ok(()));
    }

    #[test]
    fn test_missing_tags_is_rejected() {
        assert_eq!(check(json!({ "data": "m" })), Err("tags is required".into()));
        assert_eq!(
            check(json!({ "tags": null, "data": "m" })),
            Err("tags is required".into())
        );
    }

    #[test]
    fn test_malformed_tags_are_rejected() {
        let expected = Err("tags must be a non-empty array of strings".to_owned());
        assert_eq!(check(json!({ "tags": [] })), expected);
        assert_eq!(check(json!({ "tags": "info" })), expected);
        assert_eq!(check(json!({ "tags": ["info", 3] })), expected);
        assert_eq!(check(json!({ "tags": [""] })), expected);
    }

    #[test]
    fn test_non_object_event_is_rejected() {
        assert_eq!(check(json!(42)), Err("event must be an object".into()));
        assert_eq!(check(json!(["info"])), Err("event must be an object".into()));
    }

    #[test]
    fn test_ts_accepts_rfc3339_and_epoch_millis() {
        assert_eq!(
            check(json!({ "tags": ["info"], "ts": "2026-01-15T10:00:00.000Z" })),
            Ok(())
        );
        assert_eq!(
            check(json!({ "tags": ["info"], "ts": 1_768_471_200_000_u64 })),
            Ok(())
        );
    }

    #[test]
    fn test_ts_rejects_other_shapes() {
        let expected = Err("ts must be an RFC 3339 timestamp or epoch milliseconds".to_owned());
        assert_eq!(check(json!({ "tags": ["info"], "ts": "yesterday" })), expected);
        assert_eq!(check(json!({ "tags": ["info"], "ts": -1 })), expected);
        assert_eq!(check(json!({ "tags": ["info"], "ts": true })), expected);
    }

    #[test]
    fn test_level_picks_most_severe_tag() {
        assert_eq!(level(&["info", "error"]), Level::ERROR);
        assert_eq!(level(&["Warning"]), Level::WARN);
        assert_eq!(level(&["debug", "db"]), Level::DEBUG);
        assert_eq!(level(&["audit"]), Level::INFO);
        assert_eq!(level(&["trace", "INFO"]), Level::INFO);
        assert_eq!(level(&["warn", "ERROR"]), Level::ERROR);
    }

    #[test]
    fn test_tags_of_invalid_event_is_empty() {
        assert!(tags(&Event::new(json!({ "data": "m" }))).is_empty());
        assert_eq!(tags(&Event::new(json!({ "tags": ["a", "b"] }))), vec!["a", "b"]);
    }
}
