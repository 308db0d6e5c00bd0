//! Quest tree: path-addressed updates, progress and persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::node::{TaskNode, dedupe_by_title, to_children};
use super::path::NodePath;
use crate::constants::quest::{BOSS_UNLOCK_RATIO, RESCUE_HINT, ROOT_HINT};
use crate::plan::{PlanResponse, QuestType};
use crate::types::{QuestError, Result};

/// Main/side/boss tallies over the whole tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub main_completed: usize,
    pub main_total: usize,
    pub side_total: usize,
    pub boss_total: usize,
    pub boss_unlocked: bool,
}

impl Progress {
    pub fn main_ratio(&self) -> f64 {
        if self.main_total == 0 {
            0.0
        } else {
            self.main_completed as f64 / self.main_total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestTree {
    root: TaskNode,
}

impl QuestTree {
    pub fn new(root: TaskNode) -> Self {
        Self { root }
    }

    /// Root titled with the goal, children taken from the initial plan
    pub fn from_plan(goal: &str, response: &PlanResponse) -> Self {
        Self::new(TaskNode {
            title: goal.trim().to_string(),
            hint: ROOT_HINT.to_string(),
            quest_type: Some(QuestType::Main),
            difficulty: Some(response.difficulty),
            children: to_children(&response.items),
            ..Default::default()
        })
    }

    pub fn root(&self) -> &TaskNode {
        &self.root
    }

    pub fn get(&self, path: &NodePath) -> Option<&TaskNode> {
        path.indices()
            .iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    fn get_mut(&mut self, path: &NodePath) -> Option<&mut TaskNode> {
        path.indices()
            .iter()
            .try_fold(&mut self.root, |node, &i| node.children.get_mut(i))
    }

    /// Apply `f` to the node at `path`.
    ///
    /// Returns `false` and leaves the tree untouched when any index is out of range.
    pub fn update<F>(&mut self, path: &NodePath, f: F) -> bool
    where
        F: FnOnce(&mut TaskNode),
    {
        match self.get_mut(path) {
            Some(node) => {
                f(node);
                true
            }
            None => false,
        }
    }

    fn update_existing<F>(&mut self, path: &NodePath, f: F) -> Result<()>
    where
        F: FnOnce(&mut TaskNode),
    {
        if self.update(path, f) {
            Ok(())
        } else {
            Err(QuestError::NodeNotFound(path.to_string()))
        }
    }

    /// Replace the node's children with a freshly planned breakdown
    pub fn apply_expansion(&mut self, path: &NodePath, response: &PlanResponse) -> Result<()> {
        let children = to_children(&response.items);
        debug!("Expanding {} into {} tasks", path, children.len());
        self.update_existing(path, |node| {
            node.difficulty = Some(response.difficulty);
            node.children = children;
        })
    }

    /// Merge rescue tasks after the existing children, dropping duplicate titles
    pub fn apply_rescue(&mut self, path: &NodePath, response: &PlanResponse) -> Result<()> {
        let rescue = to_children(&response.items);
        self.update_existing(path, |node| {
            node.hint = RESCUE_HINT.to_string();
            let mut merged = std::mem::take(&mut node.children);
            merged.extend(rescue);
            node.children = dedupe_by_title(merged);
        })
    }

    /// Flip completion; returns the new state
    pub fn toggle_complete(&mut self, path: &NodePath) -> Result<bool> {
        let mut completed = false;
        self.update_existing(path, |node| {
            node.completed = !node.completed;
            completed = node.completed;
        })?;
        Ok(completed)
    }

    /// Every node in pre-order (a node before its children, children in order)
    pub fn flatten(&self) -> Vec<(NodePath, &TaskNode)> {
        let mut result = Vec::new();
        let mut stack = vec![(NodePath::root(), &self.root)];
        while let Some((path, node)) = stack.pop() {
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((path.child(i), child));
            }
            result.push((path, node));
        }
        result
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for (_, node) in self.flatten() {
            match node.quest_type {
                Some(QuestType::Main) => {
                    progress.main_total += 1;
                    if node.completed {
                        progress.main_completed += 1;
                    }
                }
                Some(QuestType::Side) => progress.side_total += 1,
                Some(QuestType::Boss) => progress.boss_total += 1,
                None => {}
            }
        }
        progress.boss_unlocked =
            progress.main_total > 0 && progress.main_ratio() >= BOSS_UNLOCK_RATIO;
        progress
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Saved quest tree to {}", path.display());
        Ok(())
    }
}
