//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/questcraft/config.toml)
//! 3. Project config (.questcraft/config.toml)
//! 4. Deployment variables (VOLC_*, DEEPSEEK_*, PORT)
//! 5. Environment variables (QUESTCRAFT_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{QuestError, Result};

/// Variables a plain deployment sets, mapped to their config keys
const DEPLOYMENT_ENV: &[(&str, &str)] = &[
    ("VOLC_API_KEY", "providers.doubao.api_key"),
    ("VOLC_ENDPOINT", "providers.doubao.endpoint"),
    ("VOLC_MODEL", "providers.doubao.model"),
    ("DEEPSEEK_API_KEY", "providers.deepseek.api_key"),
    ("DEEPSEEK_ENDPOINT", "providers.deepseek.endpoint"),
    ("DEEPSEEK_MODEL", "providers.deepseek.model"),
    ("PORT", "server.port"),
];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → deployment env → QUESTCRAFT_ env
    pub fn load() -> Result<Config> {
        Self::load_with(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load configuration from explicit global/project files plus the environment
    pub fn load_with(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        figment = figment
            .merge(Self::deployment_env())
            .merge(Env::prefixed("QUESTCRAFT_").split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| QuestError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn deployment_env() -> Env {
        Env::raw().filter_map(|key| {
            DEPLOYMENT_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map(|(_, path)| Uncased::from(*path))
        })
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/questcraft/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("questcraft"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".questcraft")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration (API keys are never printed)
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| QuestError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            QuestError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_template(&global_dir, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_template(&project_dir, force)?;
        Ok(project_dir)
    }

    fn write_template(dir: &Path, force: bool) -> Result<()> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config_template())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }
        Ok(())
    }

    /// Default config content (TOML). Keys belong in the environment.
    fn default_config_template() -> &'static str {
        r#"# QuestCraft Configuration
# API keys are read from VOLC_API_KEY / DEEPSEEK_API_KEY; keep them out of this file.

version = "1.0"

[server]
host = "0.0.0.0"
port = 3001
body_limit_bytes = 1048576

[llm]
default_provider = "doubao"
temperature = 0.2
timeout_secs = 30
max_retries = 0

[providers.doubao]
# endpoint = "https://ark.cn-beijing.volces.com/api/v3/chat/completions"
# model = "doubao-pro-32k"

[providers.deepseek]
endpoint = "https://api.deepseek.com/v1/chat/completions"
model = "deepseek-chat"
"#
    }
}
