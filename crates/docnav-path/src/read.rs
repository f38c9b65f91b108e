use tracing::trace;

use crate::node::{Mapping, Node};
use crate::types::ReadResult;
use crate::util::{matches_key, parse_index, SPLAT};
use crate::NavError;

/// Resolve a path against a tree without modifying it.
///
/// Missing keys, out-of-range indices and paths running through a scalar
/// all yield [`ReadResult::NotFound`]. The only error is a segment that is
/// not an index applied to an existing sequence.
///
/// # Errors
///
/// - `NavError::MalformedIndex` - a sequence was addressed by something
///   other than an index or `*`. Fan-out stops at the first such error.
///
/// # Example
///
/// ```
/// use docnav_path::{read, Node, ReadResult};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"foo1": "a", "foo2": "b", "bar": "c"}));
/// let result = read(&doc, &["foo*"]).unwrap();
/// assert_eq!(result.into_node(), Node::from(json!(["a", "b"])));
///
/// assert_eq!(read(&doc, &["bar"]).unwrap(), ReadResult::One(Node::from("c")));
/// assert_eq!(read(&doc, &["baz"]).unwrap(), ReadResult::NotFound);
/// ```
pub fn read<S: AsRef<str>>(tree: &Node, path: &[S]) -> Result<ReadResult, NavError> {
    let segments: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    resolve(tree, &segments)
}

fn resolve(node: &Node, path: &[&str]) -> Result<ReadResult, NavError> {
    let Some((head, tail)) = path.split_first() else {
        return Ok(ReadResult::One(node.clone()));
    };
    match node {
        Node::Mapping(map) => read_map(map, head, tail),
        Node::Sequence(items) => read_sequence(items, head, tail),
        _ => Ok(ReadResult::NotFound),
    }
}

fn read_map(map: &Mapping, head: &str, tail: &[&str]) -> Result<ReadResult, NavError> {
    trace!(segment = head, remaining = tail.len(), entries = map.len(), "read map");
    if head == SPLAT {
        return fan_out(map.iter().map(|(_, value)| value), tail);
    }

    let matches: Vec<&Node> = map
        .iter()
        .filter(|(key, _)| matches_key(head, key))
        .map(|(_, value)| value)
        .collect();
    match matches.len() {
        0 => Ok(ReadResult::NotFound),
        1 => resolve(matches[0], tail),
        _ => fan_out(matches.into_iter(), tail),
    }
}

fn read_sequence(items: &[Node], head: &str, tail: &[&str]) -> Result<ReadResult, NavError> {
    trace!(segment = head, remaining = tail.len(), len = items.len(), "read sequence");
    if head == SPLAT {
        return fan_out(items.iter(), tail);
    }
    let index = parse_index(head).ok_or_else(|| NavError::MalformedIndex(head.to_string()))?;
    match items.get(index) {
        Some(item) => resolve(item, tail),
        None => Ok(ReadResult::NotFound),
    }
}

fn fan_out<'a>(
    nodes: impl Iterator<Item = &'a Node>,
    tail: &[&str],
) -> Result<ReadResult, NavError> {
    nodes
        .map(|node| resolve(node, tail))
        .collect::<Result<Vec<_>, _>>()
        .map(ReadResult::Many)
}
