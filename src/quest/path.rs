//! Node addressing: `root` for the tree root, `root-<i>-<j>...` for the
//! child at index `i`, then its child at index `j`, and so on.

use std::fmt;
use std::str::FromStr;

use crate::constants::quest::ROOT_SEGMENT;
use crate::types::QuestError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parse(raw: &str) -> Result<Self, QuestError> {
        let invalid = || QuestError::InvalidPath(raw.to_string());
        let mut segments = raw.trim().split('-');

        if segments.next() != Some(ROOT_SEGMENT) {
            return Err(invalid());
        }

        segments
            .map(|segment| segment.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl FromStr for NodePath {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_SEGMENT)?;
        for index in &self.0 {
            write!(f, "-{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(NodePath::parse("root").unwrap(), NodePath::root());
        assert_eq!(
            NodePath::parse("root-0-12").unwrap().indices(),
            &[0, 12]
        );
        assert_eq!("root-3".parse::<NodePath>().unwrap().depth(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "node-1", "root-", "root-a", "root--1", "root-1-x", "1-2"] {
            assert!(
                matches!(NodePath::parse(raw), Err(QuestError::InvalidPath(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["root", "root-0", "root-2-0-5"] {
            assert_eq!(NodePath::parse(raw).unwrap().to_string(), raw);
        }
        assert_eq!(NodePath::root().child(1).child(4).to_string(), "root-1-4");
    }
}
