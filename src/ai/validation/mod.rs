//! Model Output Validation
//!
//! Turns decomposition replies into validated task lists:
//! - Array extraction from surrounding prose
//! - Field-level normalization of each task
//!
//! ## Design Philosophy
//! - Never repair a malformed array; report it as unparseable instead
//! - Drop individual unusable items rather than failing the whole reply

mod extract;
mod normalize;

pub use extract::extract_json_array;
pub use normalize::{normalize_item, normalize_items};

use crate::plan::PlanItem;

/// Extract and normalize the task list contained in a model reply.
///
/// An empty result means the reply held no usable tasks.
pub fn parse_plan_items(raw: &str) -> Vec<PlanItem> {
    extract_json_array(raw)
        .map(|values| normalize_items(&values))
        .unwrap_or_default()
}
