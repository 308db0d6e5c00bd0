pub mod error;
pub mod utils;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, QuestError, Result};
pub use utils::{json_loose, json_trimmed};
