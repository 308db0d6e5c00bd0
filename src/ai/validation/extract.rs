//! JSON Extraction
//!
//! Pulls the task array out of free model text. Models wrap the array in
//! prose or markdown fences often enough that a strict parse of the whole
//! reply is useless, so the candidate is the span from the first `[` to the
//! last `]`.
//!
//! No repair is attempted: a malformed candidate always yields `None`.

use serde_json::Value;
use tracing::debug;

/// Extract the JSON array embedded in `text`.
///
/// Returns `None` when either bracket is missing, when the last `]` does
/// not follow the first `[`, or when the candidate is not valid JSON.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    let candidate = array_candidate(text)?;

    match serde_json::from_str::<Vec<Value>>(candidate) {
        Ok(values) => Some(values),
        Err(e) => {
            debug!("Array candidate failed to parse: {}", e);
            None
        }
    }
}

/// Span from the first `[` to the last `]`, inclusive
fn array_candidate(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let values = extract_json_array(r#"[{"title":"a"},{"title":"b"}]"#).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["title"], "b");
    }

    #[test]
    fn test_array_inside_prose_and_fences() {
        let text = "好的，以下是任务清单：\n```json\n[{\"title\":\"安装\"}]\n```\n祝你顺利！";
        let values = extract_json_array(text).unwrap();
        assert_eq!(values, vec![json!({"title": "安装"})]);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(extract_json_array("[]"), Some(vec![]));
    }

    #[test]
    fn test_missing_brackets() {
        assert_eq!(extract_json_array(""), None);
        assert_eq!(extract_json_array("no json here"), None);
        assert_eq!(extract_json_array("only open ["), None);
        assert_eq!(extract_json_array("only close ]"), None);
    }

    #[test]
    fn test_reversed_brackets() {
        assert_eq!(extract_json_array("] then ["), None);
    }

    #[test]
    fn test_malformed_candidate() {
        assert_eq!(extract_json_array(r#"[{"title": "a",}]"#), None);
        assert_eq!(extract_json_array(r#"[{"title": "a"}"#), None);
    }

    #[test]
    fn test_trailing_bracket_in_prose_spoils_candidate() {
        // The last `]` belongs to the prose, so the span is not valid JSON
        let text = r#"[{"title":"a"}] see note [1]"#;
        assert_eq!(extract_json_array(text), None);
    }

    fn title_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 \u{4e00}-\u{4e2f}]{0,12}"
    }

    fn prose_strategy() -> impl Strategy<Value = String> {
        "[^\\[\\]]{0,40}"
    }

    proptest! {
        #[test]
        fn prop_embedded_array_is_recovered(
            titles in prop::collection::vec(title_strategy(), 0..6),
            prefix in prose_strategy(),
            suffix in prose_strategy(),
        ) {
            let array: Vec<Value> = titles.iter().map(|t| json!({"title": t})).collect();
            let text = format!("{}{}{}", prefix, Value::Array(array.clone()), suffix);
            prop_assert_eq!(extract_json_array(&text), Some(array));
        }

        #[test]
        fn prop_extraction_is_deterministic(text in ".{0,80}") {
            prop_assert_eq!(extract_json_array(&text), extract_json_array(&text));
        }
    }
}
