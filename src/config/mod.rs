//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/questcraft/config.toml)
//! 3. Project config (.questcraft/config.toml)
//! 4. Deployment variables (VOLC_*, DEEPSEEK_*, PORT)
//! 5. Environment variables (QUESTCRAFT_*)
//! 6. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
