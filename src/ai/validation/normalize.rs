//! Field-level sanitization of extracted task objects.

use serde_json::Value;

use crate::constants::quest::UNTITLED_TASK;
use crate::plan::{Keyword, PlanItem, QuestType};
use crate::types::json_trimmed;

/// Normalize one raw task object.
///
/// Returns `None` for non-objects and for objects whose title, description,
/// how and hint are all empty after trimming.
pub fn normalize_item(input: &Value) -> Option<PlanItem> {
    if !input.is_object() {
        return None;
    }

    let title = json_trimmed(input, "title");
    let description = json_trimmed(input, "description");
    let how = json_trimmed(input, "how");
    let hint = json_trimmed(input, "hint");
    let quest_type = QuestType::from_loose(input.get("questType").and_then(Value::as_str));
    let keywords = input
        .get("keywords")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(normalize_keyword).collect())
        .unwrap_or_default();

    if title.is_empty() && description.is_empty() && how.is_empty() && hint.is_empty() {
        return None;
    }

    Some(PlanItem {
        title: if title.is_empty() {
            UNTITLED_TASK.to_string()
        } else {
            title
        },
        description,
        how,
        hint,
        quest_type,
        keywords,
    })
}

fn normalize_keyword(input: &Value) -> Option<Keyword> {
    if !input.is_object() {
        return None;
    }
    let term = json_trimmed(input, "term");
    if term.is_empty() {
        return None;
    }
    Some(Keyword {
        term,
        explanation: json_trimmed(input, "explanation"),
    })
}

/// Normalize every entry, keeping order and dropping unusable ones
pub fn normalize_items(values: &[Value]) -> Vec<PlanItem> {
    values.iter().filter_map(normalize_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_item() {
        let item = normalize_item(&json!({
            "title": "  搭建环境 ",
            "description": "准备工具",
            "how": "安装 Node.js",
            "hint": "先装 LTS",
            "questType": " SIDE ",
            "keywords": [{"term": " LTS ", "explanation": " 长期支持版 "}]
        }))
        .unwrap();

        assert_eq!(item.title, "搭建环境");
        assert_eq!(item.quest_type, QuestType::Side);
        assert_eq!(
            item.keywords,
            vec![Keyword {
                term: "LTS".to_string(),
                explanation: "长期支持版".to_string()
            }]
        );
    }

    #[test]
    fn test_non_objects_are_dropped() {
        assert!(normalize_item(&json!("title")).is_none());
        assert!(normalize_item(&json!(null)).is_none());
        assert!(normalize_item(&json!(["title"])).is_none());
        assert!(normalize_item(&json!(3)).is_none());
    }

    #[test]
    fn test_all_empty_fields_are_dropped() {
        assert!(normalize_item(&json!({})).is_none());
        assert!(normalize_item(&json!({"title": "   ", "questType": "boss"})).is_none());
        assert!(normalize_item(&json!({"title": 12, "how": false})).is_none());
    }

    #[test]
    fn test_hint_alone_keeps_item() {
        let item = normalize_item(&json!({"hint": "别急"})).unwrap();
        assert_eq!(item.title, UNTITLED_TASK);
        assert_eq!(item.hint, "别急");
    }

    #[test]
    fn test_untitled_fallback() {
        let item = normalize_item(&json!({"description": "desc only"})).unwrap();
        assert_eq!(item.title, "未命名任务");
        assert_eq!(item.quest_type, QuestType::Main);
    }

    #[test]
    fn test_unknown_quest_type_defaults_to_main() {
        let item = normalize_item(&json!({"title": "x", "questType": "legendary"})).unwrap();
        assert_eq!(item.quest_type, QuestType::Main);
        let item = normalize_item(&json!({"title": "x", "questType": 7})).unwrap();
        assert_eq!(item.quest_type, QuestType::Main);
    }

    #[test]
    fn test_keyword_filtering() {
        let item = normalize_item(&json!({
            "title": "x",
            "keywords": [
                {"term": ""},
                {"explanation": "no term"},
                "bare string",
                {"term": "DNS"}
            ]
        }))
        .unwrap();
        assert_eq!(item.keywords.len(), 1);
        assert_eq!(item.keywords[0].term, "DNS");
        assert_eq!(item.keywords[0].explanation, "");

        let item = normalize_item(&json!({"title": "x", "keywords": "DNS"})).unwrap();
        assert!(item.keywords.is_empty());
    }

    #[test]
    fn test_normalize_items_keeps_order() {
        let values = vec![
            json!({"title": "one"}),
            json!(null),
            json!({"title": ""}),
            json!({"title": "two"}),
        ];
        let items = normalize_items(&values);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }
}
