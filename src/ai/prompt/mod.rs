//! Prompt Templates
//!
//! Fixed chat prompts for the two model calls of a plan:
//!
//! 1. **Classification**: rate the goal as simple/medium/hard
//! 2. **Decomposition**: one layer of RPG-style tasks, shaped by the
//!    difficulty (item count, keyword density) and the scenario
//!    (initial quest line, expansion, stuck rescue)

use crate::ai::provider::ChatMessage;
use crate::plan::{Difficulty, Scenario};

const CLASSIFY_SYSTEM: &str =
    "你是任务难度评估助手。只输出难度枚举：simple/medium/hard，不要输出其它内容。";

const CLASSIFY_DEFINITIONS: &[&str] = &[
    "请评估以下任务难度：",
    "定义：",
    "- simple：简单任务，只需少量步骤，不包含复杂概念",
    "- medium：中等难度，涉及部分复杂概念，步骤较多",
    "- hard：较难任务，多步骤且包含较多复杂概念",
];

const DECOMPOSE_SYSTEM: &str = "你是 RPG 学习任务拆解助手。只输出严格 JSON，不要任何多余文本。";

const ITEM_SCHEMA_LINE: &str = "1) 输出 JSON 数组，结构为 [{\"title\":\"...\",\"description\":\"...\",\"how\":\"...\",\"hint\":\"...\",\"questType\":\"main|side|boss\",\"keywords\":[{\"term\":\"...\",\"explanation\":\"...\"}]}]。";

const QUEST_TYPE_LINE: &str = "5) questType 只允许 main/side/boss。";

const TASK_LABEL: &str = "任务：";

/// Difficulty-specific decomposition rules (schema and quest type lines are shared)
fn difficulty_block(difficulty: Difficulty) -> [&'static str; 7] {
    match difficulty {
        Difficulty::Simple => [
            "请将下面的任务拆为 RPG 风格执行步骤清单。",
            "要求：",
            ITEM_SCHEMA_LINE,
            "2) 只拆一层，步骤数量 3-5 个。",
            "3) description 简要说明任务目的，how 给出具体做法。",
            "4) keywords 仅包含需要解释的复杂词汇，不多于 2 个。",
            QUEST_TYPE_LINE,
        ],
        Difficulty::Medium => [
            "请将下面的任务拆为 RPG 风格清单子任务。",
            "要求：",
            ITEM_SCHEMA_LINE,
            "2) 只拆一层，子任务数量 4-7 个。",
            "3) description 说明任务目的，how 给出清晰可执行步骤。",
            "4) keywords 仅包含复杂概念词，每项提供简短解释。",
            QUEST_TYPE_LINE,
        ],
        Difficulty::Hard => [
            "请将下面的任务拆为 RPG 风格清单子任务。",
            "要求：",
            ITEM_SCHEMA_LINE,
            "2) 只拆一层，子任务数量 6-9 个。",
            "3) description 解释任务核心点，how 给出细致步骤。",
            "4) keywords 提取复杂概念词并给出解释，每个子任务可有 1-3 个。",
            QUEST_TYPE_LINE,
        ],
    }
}

fn scenario_block(scenario: Scenario) -> &'static [&'static str] {
    match scenario {
        Scenario::Initial => &[
            "当前场景：initial（首次拆解）。",
            "目标：体现 RPG 机制，包含主线、支线与最终 BOSS。",
            "额外约束：",
            "- 至少包含 2 条 main。",
            "- 至少包含 1 条 side。",
            "- 至少包含 1 条 boss（最终验收关卡）。",
            "- 每条任务给出 hint，尽量短句。",
        ],
        Scenario::Expand => &[
            "当前场景：expand（对子任务继续拆解）。",
            "目标：输出当前节点下一层任务。",
            "额外约束：",
            "- 优先输出 main 和 side。",
            "- 除非明确是终局任务，否则不要输出 boss。",
            "- 每条任务给出 hint（执行建议）。",
        ],
        Scenario::Stuck => &[
            "当前场景：stuck（用户卡点，触发弹性教程）。",
            "目标：输出 2-4 条救援任务，强调最小可行动作与排障顺序。",
            "额外约束：",
            "- questType 优先为 side，可少量 main。",
            "- 每条 how 必须可立即执行，尽量控制在 15-30 分钟。",
            "- hint 使用鼓励式、低压力语气。",
        ],
    }
}

/// Messages for the difficulty classification call
pub fn classify_messages(question: &str) -> Vec<ChatMessage> {
    let mut lines: Vec<&str> = CLASSIFY_DEFINITIONS.to_vec();
    lines.push(TASK_LABEL);
    lines.push(question);

    vec![
        ChatMessage::system(CLASSIFY_SYSTEM),
        ChatMessage::user(lines.join("\n")),
    ]
}

/// Messages for the decomposition call
pub fn decompose_messages(
    difficulty: Difficulty,
    scenario: Scenario,
    question: &str,
) -> Vec<ChatMessage> {
    let mut lines: Vec<&str> = difficulty_block(difficulty).to_vec();
    lines.extend_from_slice(scenario_block(scenario));
    lines.push(TASK_LABEL);
    lines.push(question);

    vec![
        ChatMessage::system(DECOMPOSE_SYSTEM),
        ChatMessage::user(lines.join("\n")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::ChatRole;

    #[test]
    fn test_classify_messages() {
        let messages = classify_messages("我想学会搭建个人博客");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("simple/medium/hard"));
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[1].content.starts_with("请评估以下任务难度："));
        assert!(messages[1].content.ends_with("任务：\n我想学会搭建个人博客"));
    }

    #[test]
    fn test_decompose_item_counts_follow_difficulty() {
        let simple = decompose_messages(Difficulty::Simple, Scenario::Initial, "q");
        assert!(simple[1].content.contains("步骤数量 3-5 个"));

        let medium = decompose_messages(Difficulty::Medium, Scenario::Initial, "q");
        assert!(medium[1].content.contains("子任务数量 4-7 个"));

        let hard = decompose_messages(Difficulty::Hard, Scenario::Initial, "q");
        assert!(hard[1].content.contains("子任务数量 6-9 个"));
    }

    #[test]
    fn test_decompose_scenario_block_order() {
        let messages = decompose_messages(Difficulty::Medium, Scenario::Stuck, "修不好网络");
        let user = &messages[1].content;
        let rules = user.find("questType 只允许").unwrap();
        let scenario = user.find("当前场景：stuck").unwrap();
        let task = user.rfind("任务：\n修不好网络").unwrap();
        assert!(rules < scenario && scenario < task);
        assert!(user.ends_with("修不好网络"));
        assert!(messages[0].content.contains("严格 JSON"));
    }

    #[test]
    fn test_expand_discourages_boss() {
        let messages = decompose_messages(Difficulty::Simple, Scenario::Expand, "q");
        assert!(messages[1].content.contains("否则不要输出 boss"));
        assert!(!messages[1].content.contains("至少包含 1 条 boss"));
    }
}
