//! QuestCraft - RPG-Style Learning Quest Planner
//!
//! Turns a learning goal into a quest tree: an LLM first rates how hard the
//! goal is, then breaks it into main, side and boss tasks. Any task can be
//! broken down further, or rescued with smaller steps when the learner is
//! stuck.
//!
//! ## Core Features
//!
//! - **Two-Call Planner**: difficulty classification then task decomposition
//! - **Tolerant Parsing**: JSON arrays recovered from chatty model replies
//! - **Provider Routing**: Doubao and DeepSeek over one OpenAI-compatible client
//! - **Quest Trees**: path-addressed expansion, rescue and progress tracking
//! - **HTTP API**: `POST /api/plan` for browser front ends
//!
//! ## Quick Start
//!
//! ```ignore
//! use questcraft::{ConfigLoader, Planner, PlanRequest, ProviderKind, Scenario};
//!
//! let config = ConfigLoader::load()?;
//! let planner = Planner::from_config(&config)?;
//! let request = PlanRequest::new("我想学会搭建个人博客", ProviderKind::Deepseek, Scenario::Initial);
//! let plan = planner.plan(&request).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompts, model clients, reply extraction and normalization
//! - [`plan`]: planning vocabulary and the planner pipeline
//! - [`quest`]: quest tree model
//! - [`server`]: HTTP API
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod plan;
pub mod quest;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, LlmConfig, ProviderSettings, ServerConfig};

// Error Types
pub use types::error::{ErrorCategory, LlmError, QuestError, Result};

// =============================================================================
// Planning Re-exports
// =============================================================================

pub use plan::{
    Difficulty, Keyword, PlanItem, PlanRequest, PlanResponse, PlanSource, Planner, ProviderKind,
    QuestType, RemotePlanner, Scenario,
};

pub use quest::{NodePath, Progress, QuestTree, TaskNode};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{ChatMessage, ChatModel, OpenAiCompatibleProvider, SharedModel, with_timeout};
