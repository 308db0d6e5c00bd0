//! AI Integration Layer
//!
//! Prompt templates, the chat model seam, and validation of model output.

pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use prompt::{classify_messages, decompose_messages};
pub use provider::{
    ChatMessage, ChatModel, ChatRole, OpenAiCompatibleProvider, SharedModel, create_provider,
};
pub use timeout::with_timeout;
pub use validation::{extract_json_array, normalize_item, normalize_items, parse_plan_items};
