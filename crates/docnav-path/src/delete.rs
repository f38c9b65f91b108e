use tracing::debug;

use crate::node::{Mapping, Node};
use crate::util::parse_index;

/// Remove the entry or element `path` resolves to.
///
/// Mapping levels match the first key whose text equals the segment
/// exactly; `*` and prefix segments get no special treatment here. An
/// existing mapping is always entered by key, a sequence only by a numeric
/// segment. Anything that does not resolve leaves the tree as it is.
///
/// # Example
///
/// ```
/// use docnav_path::{delete, Node};
/// use serde_json::json;
///
/// let tree = delete(Node::from(json!({"list": [1, 2, 3]})), &["list", "1"]);
/// assert_eq!(tree, Node::from(json!({"list": [1, 3]})));
/// ```
pub fn delete<S: AsRef<str>>(tree: Node, path: &[S]) -> Node {
    let segments: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    if segments.is_empty() {
        return tree;
    }
    delete_child(tree, &segments)
}

fn delete_child(child: Node, path: &[&str]) -> Node {
    let Some((head, tail)) = path.split_first() else {
        return child;
    };
    match child {
        Node::Mapping(map) => Node::Mapping(delete_in_map(map, head, tail)),
        Node::Sequence(items) => match parse_index(head) {
            Some(index) => Node::Sequence(delete_in_sequence(items, index, tail)),
            None => Node::Sequence(items),
        },
        other => other,
    }
}

fn delete_in_map(mut map: Mapping, head: &str, tail: &[&str]) -> Mapping {
    let Some(position) = map.position(head) else {
        debug!(key = head, "key not found");
        return map;
    };
    if tail.is_empty() {
        debug!(key = head, position, "removing entry");
        map.remove_at(position);
    } else if let Some(slot) = map.value_at_mut(position) {
        let current = std::mem::take(slot);
        *slot = delete_child(current, tail);
    }
    map
}

fn delete_in_sequence(mut items: Vec<Node>, index: usize, tail: &[&str]) -> Vec<Node> {
    if index >= items.len() {
        debug!(index, len = items.len(), "index out of range");
        return items;
    }
    if tail.is_empty() {
        debug!(index, "removing element");
        items.remove(index);
    } else {
        let current = std::mem::take(&mut items[index]);
        items[index] = delete_child(current, tail);
    }
    items
}
