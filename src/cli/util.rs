//! CLI Common Utilities
//!
//! Shared context for commands that talk to a planner.

use std::sync::Arc;

use crate::config::{Config, ConfigLoader};
use crate::plan::{PlanSource, Planner, ProviderKind, RemotePlanner};
use crate::types::Result;

/// Command execution context
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Local planner or a remote server, per `--server`
    pub planner: Arc<dyn PlanSource>,
    /// Provider for this invocation
    pub provider: ProviderKind,
}

impl CommandContext {
    /// Load config and pick a plan source.
    ///
    /// With `server` set, requests go to that API; otherwise providers are
    /// built in-process from the configuration.
    pub fn load(provider: Option<ProviderKind>, server: Option<&str>) -> Result<Self> {
        let config = ConfigLoader::load()?;
        Self::with_config(config, provider, server)
    }

    pub fn with_config(
        config: Config,
        provider: Option<ProviderKind>,
        server: Option<&str>,
    ) -> Result<Self> {
        let planner: Arc<dyn PlanSource> = match server {
            Some(base) => Arc::new(RemotePlanner::new(base)?),
            None => Arc::new(Planner::from_config(&config)?),
        };
        let provider = provider.unwrap_or(config.llm.default_provider);

        Ok(Self {
            config,
            planner,
            provider,
        })
    }
}

/// `--format json` selects JSON; anything else is text
pub fn is_json(format: &str) -> bool {
    format.eq_ignore_ascii_case("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json("json"));
        assert!(is_json("JSON"));
        assert!(!is_json("text"));
    }

    #[test]
    fn test_provider_defaults_to_config() {
        let mut config = Config::default();
        config.llm.default_provider = ProviderKind::Deepseek;

        let ctx = CommandContext::with_config(config.clone(), None, None).unwrap();
        assert_eq!(ctx.provider, ProviderKind::Deepseek);

        let ctx = CommandContext::with_config(
            config,
            Some(ProviderKind::Doubao),
            Some("http://127.0.0.1:3001"),
        )
        .unwrap();
        assert_eq!(ctx.provider, ProviderKind::Doubao);
    }

    #[test]
    fn test_invalid_server_url() {
        assert!(CommandContext::with_config(Config::default(), None, Some("::nope")).is_err());
    }
}
