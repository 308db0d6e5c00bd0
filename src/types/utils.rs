//! JSON value helpers shared by normalization and request parsing.
//!
//! - `json_trimmed` - trimmed string field, empty for anything non-string
//! - `json_loose` - stringify scalars the way a loosely typed client sends them

use serde_json::Value;

/// Extract a trimmed string field. Missing or non-string values yield `""`.
#[inline]
pub fn json_trimmed(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Extract a field as text, stringifying numbers and booleans.
///
/// Returns `None` for missing, null, empty or falsy values so callers can
/// fall back to a default.
pub fn json_loose(value: &Value, key: &str) -> Option<String> {
    let text = match value.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null => return None,
        // Objects and arrays are never meaningful request text
        Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_trimmed() {
        let v = json!({"title": "  Learn Rust  ", "count": 3});
        assert_eq!(json_trimmed(&v, "title"), "Learn Rust");
        assert_eq!(json_trimmed(&v, "count"), "");
        assert_eq!(json_trimmed(&v, "missing"), "");
    }

    #[test]
    fn test_json_loose() {
        let v = json!({"a": " x ", "b": 42, "c": false, "d": null, "e": "   ", "f": 0});
        assert_eq!(json_loose(&v, "a").as_deref(), Some("x"));
        assert_eq!(json_loose(&v, "b").as_deref(), Some("42"));
        assert_eq!(json_loose(&v, "c"), None);
        assert_eq!(json_loose(&v, "d"), None);
        assert_eq!(json_loose(&v, "e"), None);
        assert_eq!(json_loose(&v, "f"), None);
        assert_eq!(json_loose(&v, "zzz"), None);
    }
}
