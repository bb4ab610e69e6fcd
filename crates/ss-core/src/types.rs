//! Shared record types

use serde_json::{Map, Value};

/// One row of a table, keyed by column name.
///
/// Rows read from disk hold only strings. Rows built by the facade may carry
/// numbers or booleans until they are serialized.
pub type Record = Map<String, Value>;

/// Render a field value the way it is written to disk
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// True when the field is missing, null, or an empty string
pub fn is_blank(record: &Record, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Compare a field against a key, using its on-disk text form
pub fn field_equals(record: &Record, field: &str, key: &str) -> bool {
    record
        .get(field)
        .map(|value| field_text(value) == key)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("Go")), "Go");
        assert_eq!(field_text(&json!(0)), "0");
        assert_eq!(field_text(&json!(2.5)), "2.5");
        assert_eq!(field_text(&json!(true)), "true");
        assert_eq!(field_text(&Value::Null), "");
        assert_eq!(field_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_is_blank() {
        let record = json!({"a": "", "b": null, "c": "x", "d": 0})
            .as_object()
            .cloned()
            .unwrap();
        assert!(is_blank(&record, "a"));
        assert!(is_blank(&record, "b"));
        assert!(is_blank(&record, "missing"));
        assert!(!is_blank(&record, "c"));
        assert!(!is_blank(&record, "d"));
    }

    #[test]
    fn test_field_equals_numeric_key() {
        let record = json!({"id": 42}).as_object().cloned().unwrap();
        assert!(field_equals(&record, "id", "42"));
        assert!(!field_equals(&record, "other", "42"));
    }
}
