use console::style;

use crate::plan::{Difficulty, PlanItem, PlanResponse, QuestType};
use crate::quest::{NodePath, Progress, QuestTree, Segment, TaskNode, highlight_keywords};

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    // =========================================================================
    // Plans
    // =========================================================================

    pub fn plan(&self, response: &PlanResponse) {
        self.header(&format!(
            "难度 {} · {} 个任务 ({})",
            difficulty_badge(response.difficulty),
            response.items.len(),
            response.scenario
        ));
        for (i, item) in response.items.iter().enumerate() {
            println!();
            println!(
                "{}. {} {}",
                i + 1,
                quest_badge(Some(item.quest_type)),
                style(&item.title).bold()
            );
            for line in item_lines(item) {
                println!("   {}", line);
            }
        }
    }

    // =========================================================================
    // Quest Trees
    // =========================================================================

    pub fn tree(&self, tree: &QuestTree) {
        for (path, node) in tree.flatten() {
            println!("{}", node_line(&path, node));
            let indent = "  ".repeat(path.depth() + 1);
            for line in node_lines(node) {
                println!("{}  {}", indent, line);
            }
        }
    }

    pub fn progress(&self, progress: &Progress) {
        self.section("进度");
        println!(
            "  主线进度  {} / {} 已完成",
            progress.main_completed, progress.main_total
        );
        println!("  支线可选  {} 条待补给", progress.side_total);
        let boss = if progress.boss_unlocked {
            style("已解锁").green()
        } else {
            style("主线完成 80% 后开启").red()
        };
        println!("  BOSS 解锁 {}", boss);
        if progress.boss_total == 0 {
            println!(
                "  {}",
                style("提示：你可以继续拆解主线，系统会在后续阶段生成 BOSS 验收任务。").dim()
            );
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn difficulty_badge(difficulty: Difficulty) -> String {
    let label = difficulty.as_str().to_uppercase();
    match difficulty {
        Difficulty::Simple => style(label).green().to_string(),
        Difficulty::Medium => style(label).yellow().to_string(),
        Difficulty::Hard => style(label).red().to_string(),
    }
}

fn quest_badge(quest_type: Option<QuestType>) -> String {
    match quest_type {
        Some(QuestType::Main) => style("[main]").cyan().to_string(),
        Some(QuestType::Side) => style("[side]").green().to_string(),
        Some(QuestType::Boss) => style("[boss]").magenta().bold().to_string(),
        None => String::new(),
    }
}

/// Render highlighted text; keywords are underlined with the explanation after them
pub fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain { text } => text.clone(),
            Segment::Keyword { text, explanation } if explanation.is_empty() => {
                style(text).underlined().cyan().to_string()
            }
            Segment::Keyword { text, explanation } => format!(
                "{}{}",
                style(text).underlined().cyan(),
                style(format!("({})", explanation)).dim()
            ),
        })
        .collect()
}

fn labelled(label: &str, text: &str) -> String {
    format!("{} {}", style(label).dim(), text)
}

fn item_lines(item: &PlanItem) -> Vec<String> {
    let mut lines = Vec::new();
    if !item.description.is_empty() {
        let text = render_segments(&highlight_keywords(&item.description, &item.keywords));
        lines.push(labelled("描述：", &text));
    }
    if !item.how.is_empty() {
        let text = render_segments(&highlight_keywords(&item.how, &item.keywords));
        lines.push(labelled("做法：", &text));
    }
    if !item.hint.is_empty() {
        lines.push(labelled("提示：", &item.hint));
    }
    lines
}

fn node_line(path: &NodePath, node: &TaskNode) -> String {
    let indent = "  ".repeat(path.depth());
    let check = if node.completed {
        style("[x]").green().to_string()
    } else {
        "[ ]".to_string()
    };
    let title = if node.completed {
        style(&node.title).strikethrough().dim().to_string()
    } else {
        style(&node.title).bold().to_string()
    };
    let mut line = format!("{}{} {}", indent, check, title);

    let badge = quest_badge(node.quest_type());
    if !badge.is_empty() {
        line.push(' ');
        line.push_str(&badge);
    }
    if let Some(difficulty) = node.difficulty {
        line.push(' ');
        line.push_str(&difficulty_badge(difficulty));
    }
    line.push_str(&format!("  {}", style(path.to_string()).dim()));
    line
}

fn node_lines(node: &TaskNode) -> Vec<String> {
    let mut lines = Vec::new();
    if !node.hint.is_empty() {
        lines.push(labelled("提示：", &node.hint));
    }
    if !node.description.is_empty() {
        let text = render_segments(&highlight_keywords(&node.description, &node.keywords));
        lines.push(labelled("描述：", &text));
    }
    if !node.how.is_empty() {
        let text = render_segments(&highlight_keywords(&node.how, &node.keywords));
        lines.push(labelled("做法：", &text));
    }
    lines
}
