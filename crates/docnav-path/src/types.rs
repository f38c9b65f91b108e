//! Type definitions for path resolution.

use crate::node::Node;

/// A single path segment.
pub type Segment = String;

/// A path, as produced by [`split_path`](crate::split_path).
pub type Path = Vec<Segment>;

/// Outcome of a read.
///
/// Wildcards, prefix keys, duplicate keys and splats fan out into several
/// branches. `Many` keeps one slot per branch in document order, so a
/// sequence that was *found* is always `One(Node::Sequence(..))` and never
/// confused with fan-out.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    NotFound,
    One(Node),
    Many(Vec<ReadResult>),
}

impl ReadResult {
    pub fn is_found(&self) -> bool {
        !matches!(self, ReadResult::NotFound)
    }

    pub fn as_one(&self) -> Option<&Node> {
        match self {
            ReadResult::One(node) => Some(node),
            _ => None,
        }
    }

    /// Collapse into a plain node for output.
    ///
    /// `NotFound` becomes `Null` and fan-out becomes a sequence.
    pub fn into_node(self) -> Node {
        match self {
            ReadResult::NotFound => Node::Null,
            ReadResult::One(node) => node,
            ReadResult::Many(results) => {
                Node::Sequence(results.into_iter().map(ReadResult::into_node).collect())
            }
        }
    }
}

impl From<ReadResult> for Node {
    fn from(result: ReadResult) -> Self {
        result.into_node()
    }
}
