//! Field resolution for gateway responses
//!
//! The gateway does not use a single field name across API versions, so
//! lookups go through an ordered list of candidate names. The first candidate
//! present wins.

use serde_json::{Map, Value};

/// Candidate names for the task identifier in a create response, by precedence.
pub const TASK_ID_FIELDS: &[&str] = &["task_id", "id"];

/// Candidate names for the state in a status response, by precedence.
pub const STATE_FIELDS: &[&str] = &["status", "state"];

/// Key the gateway uses to report a failure in an otherwise normal body.
pub const ERROR_FIELD: &str = "error";

/// Return the value of the first candidate field whose key is present.
///
/// A present key wins even when its value is `null` or not a string; later
/// candidates are only consulted when earlier keys are absent.
pub fn resolve_field<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    resolve_in_object(value.as_object()?, candidates)
}

/// Same as [`resolve_field`] for an already-unwrapped object
pub fn resolve_in_object<'a>(
    object: &'a Map<String, Value>,
    candidates: &[&str],
) -> Option<&'a Value> {
    candidates.iter().find_map(|name| object.get(*name))
}

/// Return the first candidate field usable as an identifier.
///
/// Non-empty strings are taken as-is and numbers are rendered in decimal.
/// Null, empty or structured values do not count as an identifier.
pub fn resolve_id(value: &Value, candidates: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    candidates
        .iter()
        .find_map(|name| object.get(*name).and_then(id_text))
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Whether a gateway response reports an error.
pub fn is_gateway_error(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key(ERROR_FIELD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_candidate_wins() {
        let value = json!({ "status": "running", "state": "completed" });
        assert_eq!(resolve_field(&value, STATE_FIELDS), Some(&json!("running")));
    }

    #[test]
    fn test_falls_back_when_primary_is_absent() {
        let value = json!({ "state": "done" });
        assert_eq!(resolve_field(&value, STATE_FIELDS), Some(&json!("done")));
    }

    #[test]
    fn test_present_null_primary_blocks_fallback() {
        let value = json!({ "status": null, "state": "completed" });
        assert_eq!(resolve_field(&value, STATE_FIELDS), Some(&Value::Null));
    }

    #[test]
    fn test_non_object_resolves_to_none() {
        assert_eq!(resolve_field(&json!([1, 2]), STATE_FIELDS), None);
        assert_eq!(resolve_field(&json!("completed"), STATE_FIELDS), None);
        assert_eq!(resolve_id(&json!(42), TASK_ID_FIELDS), None);
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        assert_eq!(
            resolve_id(&json!({ "task_id": 12345 }), TASK_ID_FIELDS),
            Some("12345".to_string())
        );
    }

    #[test]
    fn test_unusable_id_falls_through() {
        let value = json!({ "task_id": null, "id": "abc" });
        assert_eq!(resolve_id(&value, TASK_ID_FIELDS), Some("abc".to_string()));
        assert_eq!(resolve_id(&json!({ "task_id": "" }), TASK_ID_FIELDS), None);
        assert_eq!(resolve_id(&json!({ "task_id": false }), TASK_ID_FIELDS), None);
        assert_eq!(resolve_id(&json!({ "task_id": ["t-1"] }), TASK_ID_FIELDS), None);
    }

    #[test]
    fn test_gateway_error_detection() {
        assert!(is_gateway_error(&json!({ "error": "bad key" })));
        assert!(is_gateway_error(&json!({ "error": null })));
        assert!(!is_gateway_error(&json!({ "task_id": "t-1" })));
        assert!(!is_gateway_error(&json!(["error"])));
    }
}
