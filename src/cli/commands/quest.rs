//! Quest Command
//!
//! Build and work through a quest tree stored as JSON.
//!
//! Usage:
//!   questcraft quest new [GOAL] [--file quest.json]
//!   questcraft quest show [--format json]
//!   questcraft quest expand <PATH>
//!   questcraft quest stuck <PATH>
//!   questcraft quest done <PATH>

use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, is_json};
use crate::plan::{PlanRequest, PlanSource, ProviderKind, Scenario};
use crate::quest::{NodePath, QuestTree, sample_goal};
use crate::types::{QuestError, Result};

/// Where the tree lives and how to reach a planner
pub struct QuestOptions {
    pub file: PathBuf,
    pub provider: Option<ProviderKind>,
    pub server: Option<String>,
}

impl QuestOptions {
    fn context(&self) -> Result<CommandContext> {
        CommandContext::load(self.provider, self.server.as_deref())
    }
}

// =============================================================================
// Tree Operations
// =============================================================================

/// Plan a new quest for `goal`
pub async fn create(
    planner: &dyn PlanSource,
    provider: ProviderKind,
    goal: &str,
) -> Result<QuestTree> {
    let request = PlanRequest::new(goal, provider, Scenario::Initial);
    let response = planner.plan(&request).await?;
    Ok(QuestTree::from_plan(goal, &response))
}

fn node_title(tree: &QuestTree, path: &NodePath) -> Result<String> {
    tree.get(path)
        .map(|node| node.title.clone())
        .ok_or_else(|| QuestError::NodeNotFound(path.to_string()))
}

/// Break the node at `path` into fresh subtasks
pub async fn expand(
    tree: &mut QuestTree,
    planner: &dyn PlanSource,
    provider: ProviderKind,
    path: &NodePath,
) -> Result<()> {
    let title = node_title(tree, path)?;
    let request = PlanRequest::new(title, provider, Scenario::Expand);
    let response = planner.plan(&request).await?;
    tree.apply_expansion(path, &response)
}

/// Add smaller rescue steps under the node at `path`
pub async fn rescue(
    tree: &mut QuestTree,
    planner: &dyn PlanSource,
    provider: ProviderKind,
    path: &NodePath,
) -> Result<()> {
    let title = node_title(tree, path)?;
    let request = PlanRequest::new(title, provider, Scenario::Stuck);
    let response = planner.plan(&request).await?;
    tree.apply_rescue(path, &response)
}

// =============================================================================
// Commands
// =============================================================================

pub async fn new(goal: Option<String>, options: &QuestOptions) -> Result<()> {
    let output = Output::new();
    let goal = match goal.map(|g| g.trim().to_string()).filter(|g| !g.is_empty()) {
        Some(goal) => goal,
        None => {
            let goal = sample_goal().to_string();
            output.info(&format!("未提供目标，随机选择：{}", goal));
            goal
        }
    };

    let ctx = options.context()?;
    let tree = create(ctx.planner.as_ref(), ctx.provider, &goal).await?;
    tree.save(&options.file)?;
    info!("Quest saved to {}", options.file.display());

    output.success(&format!("目标已接取：{}", goal));
    output.tree(&tree);
    output.progress(&tree.progress());
    Ok(())
}

pub fn show(file: &Path, format: &str) -> Result<()> {
    let tree = QuestTree::load(file)?;
    if is_json(format) {
        let report = serde_json::json!({
            "tree": tree,
            "progress": tree.progress(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let output = Output::new();
        output.tree(&tree);
        output.progress(&tree.progress());
    }
    Ok(())
}

pub async fn expand_node(path: &str, options: &QuestOptions) -> Result<()> {
    let path = NodePath::parse(path)?;
    let mut tree = QuestTree::load(&options.file)?;
    let ctx = options.context()?;

    expand(&mut tree, ctx.planner.as_ref(), ctx.provider, &path).await?;
    tree.save(&options.file)?;

    let output = Output::new();
    output.success(&format!("已拆解 {}", path));
    output.tree(&tree);
    Ok(())
}

pub async fn stuck(path: &str, options: &QuestOptions) -> Result<()> {
    let path = NodePath::parse(path)?;
    let mut tree = QuestTree::load(&options.file)?;
    let ctx = options.context()?;

    rescue(&mut tree, ctx.planner.as_ref(), ctx.provider, &path).await?;
    tree.save(&options.file)?;

    let output = Output::new();
    output.success(&format!("已触发弹性教程 {}", path));
    output.tree(&tree);
    Ok(())
}

pub fn done(path: &str, file: &Path) -> Result<()> {
    let path = NodePath::parse(path)?;
    let mut tree = QuestTree::load(file)?;
    let completed = tree.toggle_complete(&path)?;
    tree.save(file)?;

    let output = Output::new();
    if completed {
        output.success(&format!("已完成 {}", path));
    } else {
        output.warning(&format!("已取消完成 {}", path));
    }

    let progress = tree.progress();
    output.progress(&progress);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::quest::RESCUE_HINT;
    use crate::plan::{Difficulty, Planner, ScriptedModel};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn planner(replies: &[&str]) -> (Planner, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::replying(replies));
        let planner = Planner::new(Duration::from_secs(5), 0)
            .with_model(ProviderKind::Deepseek, model.clone());
        (planner, model)
    }

    fn path(raw: &str) -> NodePath {
        NodePath::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_create_expand_and_rescue() {
        let (planner, model) = planner(&[
            "medium",
            r#"[{"title": "注册域名", "questType": "main"}, {"title": "挑主题", "questType": "side"}]"#,
            "simple",
            r#"[{"title": "比较注册商"}]"#,
            "simple",
            r#"[{"title": "比较注册商"}, {"title": "先查域名是否可用"}]"#,
        ]);

        let mut tree = create(&planner, ProviderKind::Deepseek, "搭建个人博客")
            .await
            .unwrap();
        assert_eq!(tree.root().children.len(), 2);
        assert_eq!(tree.root().difficulty, Some(Difficulty::Medium));

        expand(&mut tree, &planner, ProviderKind::Deepseek, &path("root-0"))
            .await
            .unwrap();
        assert_eq!(tree.get(&path("root-0-0")).unwrap().title, "比较注册商");

        rescue(&mut tree, &planner, ProviderKind::Deepseek, &path("root-0"))
            .await
            .unwrap();
        let node = tree.get(&path("root-0")).unwrap();
        assert_eq!(node.hint, RESCUE_HINT);
        assert_eq!(node.children.len(), 2);

        // expansion and rescue ask about the node title, not the goal
        let calls = model.calls.lock().unwrap();
        assert!(calls[3].iter().any(|m| m.content.ends_with("\n注册域名")));
        assert!(calls[5].iter().any(|m| m.content.ends_with("\n注册域名")));
    }

    #[tokio::test]
    async fn test_expand_missing_node_makes_no_calls() {
        let (planner, model) = planner(&["simple", r#"[{"title": "a"}]"#]);
        let mut tree = create(&planner, ProviderKind::Deepseek, "goal").await.unwrap();

        let err = expand(&mut tree, &planner, ProviderKind::Deepseek, &path("root-4"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuestError::NodeNotFound(_)));
        assert_eq!(model.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_done_toggles_saved_tree() {
        let (planner, _) = planner(&["simple", r#"[{"title": "a"}, {"title": "b"}]"#]);
        let tree = create(&planner, ProviderKind::Deepseek, "goal").await.unwrap();

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("quest.json");
        tree.save(&file).unwrap();

        done("root-1", &file).unwrap();
        let reloaded = QuestTree::load(&file).unwrap();
        assert!(reloaded.get(&path("root-1")).unwrap().completed);

        assert!(matches!(
            done("root-x", &file),
            Err(QuestError::InvalidPath(_))
        ));
        assert!(matches!(
            done("root-9", &file),
            Err(QuestError::NodeNotFound(_))
        ));
    }
}
