//! LLM Provider Abstraction
//!
//! Defines the `ChatModel` trait: messages in, free text out. The planner
//! never looks at provider wire formats; it only shapes prompts and parses
//! the returned text.
//!
//! Both supported backends (Doubao via Volcengine, DeepSeek) speak the
//! OpenAI chat completions protocol, so one client covers them.

mod openai;

pub use openai::OpenAiCompatibleProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{LlmConfig, ProviderSettings};
use crate::plan::ProviderKind;
use crate::types::Result;

// =============================================================================
// Chat Messages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

// =============================================================================
// Chat Model Trait
// =============================================================================

/// A text completion backend
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation and return the reply text (possibly empty)
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Shared model handle used by the planner and the server
pub type SharedModel = Arc<dyn ChatModel>;

/// Create a model client for `kind`.
///
/// Returns `Ok(None)` when the provider lacks a key, endpoint or model; the
/// planner reports that per request instead of refusing to start.
pub fn create_provider(
    kind: ProviderKind,
    settings: &ProviderSettings,
    llm: &LlmConfig,
) -> Result<Option<SharedModel>> {
    let (Some(api_key), Some(endpoint), Some(model)) = (
        settings.api_key(),
        settings.endpoint(),
        settings.model(),
    ) else {
        return Ok(None);
    };

    let provider = OpenAiCompatibleProvider::new(
        kind.as_str(),
        api_key,
        endpoint,
        model,
        llm.temperature,
    )?;
    Ok(Some(Arc::new(provider)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let value = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "system", "content": "hi"}));
    }

    #[test]
    fn test_incomplete_settings_yield_no_provider() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            endpoint: None,
            model: Some("deepseek-chat".to_string()),
        };
        let provider =
            create_provider(ProviderKind::Deepseek, &settings, &LlmConfig::default()).unwrap();
        assert!(provider.is_none());
    }

    #[test]
    fn test_complete_settings_yield_provider() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            endpoint: Some("https://example.com/v1/chat/completions".to_string()),
            model: Some("deepseek-chat".to_string()),
        };
        let provider = create_provider(ProviderKind::Deepseek, &settings, &LlmConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(provider.name(), "deepseek");
        assert_eq!(provider.model(), "deepseek-chat");
    }
}
