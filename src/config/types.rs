//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{network, provider};
use crate::plan::ProviderKind;
use crate::types::{QuestError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// HTTP API settings
    pub server: ServerConfig,

    /// Model call behaviour shared by all providers
    pub llm: LlmConfig,

    /// Per-provider credentials and endpoints
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(QuestError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(QuestError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(QuestError::Config(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(QuestError::Config(
                "Server body_limit_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Listening port
    pub port: u16,

    /// Maximum accepted request body in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_string(),
            port: network::DEFAULT_PORT,
            body_limit_bytes: network::DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider used when a request names none
    pub default_provider: ProviderKind,

    /// Sampling temperature for both model calls
    pub temperature: f32,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// Extra attempts for transient failures (0 = single attempt)
    pub max_retries: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::Doubao,
            temperature: provider::DEFAULT_TEMPERATURE,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            max_retries: 0,
        }
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub doubao: ProviderSettings,
    pub deepseek: ProviderSettings,
}

impl ProvidersConfig {
    /// Effective settings for a provider, with built-in endpoint fallbacks applied
    pub fn get(&self, kind: ProviderKind) -> ProviderSettings {
        match kind {
            ProviderKind::Doubao => self.doubao.clone(),
            ProviderKind::Deepseek => {
                let mut settings = self.deepseek.clone();
                if settings.endpoint().is_none() {
                    settings.endpoint = Some(provider::DEEPSEEK_ENDPOINT.to_string());
                }
                settings
            }
        }
    }
}

/// Credentials and endpoint for one provider
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Full chat completions URL
    pub endpoint: Option<String>,

    pub model: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ProviderSettings {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }

    pub fn endpoint(&self) -> Option<&str> {
        non_blank(&self.endpoint)
    }

    pub fn model(&self) -> Option<&str> {
        non_blank(&self.model)
    }

    /// Key, endpoint and model are all present
    pub fn is_complete(&self) -> bool {
        self.api_key().is_some() && self.endpoint().is_some() && self.model().is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================
