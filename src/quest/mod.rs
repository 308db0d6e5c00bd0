//! Quest Tree
//!
//! The task tree a learner works through: the goal at the root, planned
//! tasks below it, expanded or rescued in place by path.

mod highlight;
mod node;
mod path;
mod tree;

pub use highlight::{Segment, highlight_keywords};
pub use node::{TaskNode, dedupe_by_title, to_children};
pub use path::NodePath;
pub use tree::{Progress, QuestTree};

use rand::seq::IndexedRandom;

use crate::constants::quest::SAMPLE_GOALS;

/// A random example goal for prompting new users
pub fn sample_goal() -> &'static str {
    SAMPLE_GOALS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(SAMPLE_GOALS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_goal_is_from_list() {
        for _ in 0..20 {
            assert!(SAMPLE_GOALS.contains(&sample_goal()));
        }
    }
}
