//! Quest tree nodes and their construction from plan items.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::plan::{Difficulty, Keyword, PlanItem, QuestType};

/// One task in the quest tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub how: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_type: Option<QuestType>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub children: Vec<TaskNode>,
}

impl TaskNode {
    pub fn quest_type(&self) -> Option<QuestType> {
        self.quest_type
    }
}

impl From<&PlanItem> for TaskNode {
    fn from(item: &PlanItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            how: item.how.clone(),
            hint: item.hint.clone(),
            quest_type: Some(item.quest_type),
            keywords: item.keywords.clone(),
            difficulty: None,
            completed: false,
            children: Vec::new(),
        }
    }
}

/// Fresh, uncompleted leaf nodes for each titled item
pub fn to_children(items: &[PlanItem]) -> Vec<TaskNode> {
    items
        .iter()
        .filter(|item| !item.title.is_empty())
        .map(TaskNode::from)
        .collect()
}

/// Keep the first node per case-insensitive trimmed title; untitled nodes are dropped
pub fn dedupe_by_title(nodes: Vec<TaskNode>) -> Vec<TaskNode> {
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|node| {
            let key = node.title.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
