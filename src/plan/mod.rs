//! Planning vocabulary
//!
//! Types shared by the planner pipeline, the HTTP API and the quest tree:
//! difficulty levels, planning scenarios, quest kinds and the plan payloads.

mod planner;
mod remote;

pub use planner::{PlanSource, Planner};
pub use remote::RemotePlanner;

#[cfg(test)]
pub(crate) use planner::tests::ScriptedModel;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::types::json_loose;

// =============================================================================
// Difficulty
// =============================================================================

/// Difficulty assessed by the classification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Simple => "simple",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a difficulty out of free model text.
///
/// Checks run in order simple, medium, hard; the first hit wins, and text
/// matching none of them is treated as medium.
pub fn parse_difficulty(text: &str) -> Difficulty {
    let normalized = text.to_lowercase();
    if normalized.contains("简单") || normalized.contains("simple") {
        Difficulty::Simple
    } else if normalized.contains("中等") || normalized.contains("medium") {
        Difficulty::Medium
    } else if normalized.contains("较难")
        || normalized.contains("困难")
        || normalized.contains("hard")
    {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

// =============================================================================
// Scenario
// =============================================================================

/// Why a plan is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// First decomposition of a new goal
    #[default]
    Initial,
    /// Break an existing node into its next layer
    Expand,
    /// Rescue tasks for a node the user is stuck on
    Stuck,
}

impl Scenario {
    /// Lenient parse: unknown or missing values fall back to `Initial`
    pub fn from_loose(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Initial => "initial",
            Scenario::Expand => "expand",
            Scenario::Stuck => "stuck",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(Scenario::Initial),
            "expand" => Ok(Scenario::Expand),
            "stuck" => Ok(Scenario::Stuck),
            _ => Err(format!(
                "Unknown scenario: {}. Valid values: initial, expand, stuck",
                s
            )),
        }
    }
}

// =============================================================================
// Quest Type
// =============================================================================

/// RPG role of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    #[default]
    Main,
    Side,
    Boss,
}

impl QuestType {
    /// Lenient parse: anything outside main/side/boss becomes `Main`
    pub fn from_loose(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("side") => QuestType::Side,
            Some("boss") => QuestType::Boss,
            _ => QuestType::Main,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Main => "main",
            QuestType::Side => "side",
            QuestType::Boss => "boss",
        }
    }
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Provider Kind
// =============================================================================

/// Model backends the planner can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Volcengine Doubao (OpenAI-compatible endpoint)
    Doubao,
    #[default]
    Deepseek,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Doubao, ProviderKind::Deepseek];

    /// Only an exact `deepseek` selects DeepSeek; every other name routes to Doubao.
    pub fn from_name(name: &str) -> Self {
        if name.trim() == "deepseek" {
            ProviderKind::Deepseek
        } else {
            ProviderKind::Doubao
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Doubao => "doubao",
            ProviderKind::Deepseek => "deepseek",
        }
    }

    /// Environment variable prefix the deployment uses for this provider
    pub fn env_label(&self) -> &'static str {
        match self {
            ProviderKind::Doubao => "VOLC",
            ProviderKind::Deepseek => "DEEPSEEK",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doubao" | "volc" => Ok(ProviderKind::Doubao),
            "deepseek" => Ok(ProviderKind::Deepseek),
            _ => Err(format!(
                "Unknown provider: {}. Valid values: doubao, deepseek",
                s
            )),
        }
    }
}

// =============================================================================
// Plan Payloads
// =============================================================================

/// A term in a task that deserves an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    #[serde(default)]
    pub explanation: String,
}

/// One normalized task produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub how: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub quest_type: QuestType,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// Inbound planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    pub question: String,
    pub provider: ProviderKind,
    pub scenario: Scenario,
}

impl PlanRequest {
    pub fn new(question: impl Into<String>, provider: ProviderKind, scenario: Scenario) -> Self {
        Self {
            question: question.into().trim().to_string(),
            provider,
            scenario,
        }
    }

    /// Build a request from an arbitrary JSON body.
    ///
    /// Field values are coerced rather than rejected; an empty question is
    /// left for the planner to report.
    pub fn from_json(body: &Value, default_provider: ProviderKind) -> Self {
        let question = json_loose(body, "question").unwrap_or_default();
        let provider = json_loose(body, "provider")
            .map(|name| ProviderKind::from_name(&name))
            .unwrap_or(default_provider);
        let scenario = Scenario::from_loose(json_loose(body, "scenario").as_deref());

        Self {
            question,
            provider,
            scenario,
        }
    }
}

/// Planning result returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub difficulty: Difficulty,
    #[serde(default)]
    pub scenario: Scenario,
    pub items: Vec<PlanItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty("simple"), Difficulty::Simple);
        assert_eq!(parse_difficulty("  HARD\n"), Difficulty::Hard);
        assert_eq!(parse_difficulty("这是一个中等难度的任务"), Difficulty::Medium);
        assert_eq!(parse_difficulty("较难"), Difficulty::Hard);
        assert_eq!(parse_difficulty("困难"), Difficulty::Hard);
        assert_eq!(parse_difficulty("no idea"), Difficulty::Medium);
        assert_eq!(parse_difficulty(""), Difficulty::Medium);
    }

    #[test]
    fn test_parse_difficulty_first_match_wins() {
        // "simple" is checked before "hard"
        assert_eq!(parse_difficulty("not simple, quite hard"), Difficulty::Simple);
    }

    #[test]
    fn test_scenario_from_loose() {
        assert_eq!(Scenario::from_loose(Some(" Expand ")), Scenario::Expand);
        assert_eq!(Scenario::from_loose(Some("STUCK")), Scenario::Stuck);
        assert_eq!(Scenario::from_loose(Some("bogus")), Scenario::Initial);
        assert_eq!(Scenario::from_loose(None), Scenario::Initial);
    }

    #[test]
    fn test_quest_type_from_loose() {
        assert_eq!(QuestType::from_loose(Some(" Boss ")), QuestType::Boss);
        assert_eq!(QuestType::from_loose(Some("side")), QuestType::Side);
        assert_eq!(QuestType::from_loose(Some("epic")), QuestType::Main);
        assert_eq!(QuestType::from_loose(None), QuestType::Main);
    }

    #[test]
    fn test_provider_kind_from_name() {
        assert_eq!(ProviderKind::from_name("deepseek"), ProviderKind::Deepseek);
        assert_eq!(ProviderKind::from_name("doubao"), ProviderKind::Doubao);
        assert_eq!(ProviderKind::from_name("openai"), ProviderKind::Doubao);
        assert_eq!(ProviderKind::Doubao.env_label(), "VOLC");
    }

    #[test]
    fn test_plan_request_from_json() {
        let body = json!({"question": "  学会做简历 ", "provider": "deepseek", "scenario": "Stuck"});
        let req = PlanRequest::from_json(&body, ProviderKind::Doubao);
        assert_eq!(req.question, "学会做简历");
        assert_eq!(req.provider, ProviderKind::Deepseek);
        assert_eq!(req.scenario, Scenario::Stuck);

        let req = PlanRequest::from_json(&json!({"question": 42}), ProviderKind::Doubao);
        assert_eq!(req.question, "42");
        assert_eq!(req.provider, ProviderKind::Doubao);
        assert_eq!(req.scenario, Scenario::Initial);

        let req = PlanRequest::from_json(&json!(null), ProviderKind::Deepseek);
        assert!(req.question.is_empty());
    }

    #[test]
    fn test_plan_item_wire_format() {
        let item = PlanItem {
            title: "Install".to_string(),
            description: String::new(),
            how: String::new(),
            hint: String::new(),
            quest_type: QuestType::Boss,
            keywords: vec![],
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["questType"], "boss");

        let parsed: PlanItem = serde_json::from_value(json!({"title": "Only title"})).unwrap();
        assert_eq!(parsed.quest_type, QuestType::Main);
        assert!(parsed.keywords.is_empty());
    }
}
