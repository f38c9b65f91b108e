use std::mem;

use tracing::{debug, warn};

use crate::node::{Mapping, Node};
use crate::util::{is_array_segment, matches_key, parse_index, APPEND, SPLAT};

/// Install `value` at every location `path` resolves to.
///
/// Missing mapping entries are appended and sequences are padded with
/// `Null` up to the target index. Whether a missing or null child becomes a
/// sequence or a mapping is decided by the next segment: array operators
/// fabricate a sequence, anything else a mapping. An existing mapping is
/// never turned into a sequence.
///
/// An empty path leaves the tree as it is. An index too large to pad up to
/// leaves the sequence as it is.
///
/// # Example
///
/// ```
/// use docnav_path::{write, Node};
/// use serde_json::json;
///
/// let tree = write(Node::from(json!({})), &["x", "0", "y"], Node::from("v"));
/// assert_eq!(tree, Node::from(json!({"x": [{"y": "v"}]})));
///
/// let tree = write(tree, &["x", "+"], Node::from(9));
/// assert_eq!(tree, Node::from(json!({"x": [{"y": "v"}, 9]})));
/// ```
pub fn write<S: AsRef<str>>(tree: Node, path: &[S], value: Node) -> Node {
    let segments: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    if segments.is_empty() {
        return tree;
    }
    updated_child(tree, &segments, &value)
}

/// New value for a child whose own segment has just been consumed.
fn updated_child(child: Node, remaining: &[&str], value: &Node) -> Node {
    let Some(next) = remaining.first() else {
        return value.clone();
    };
    let array_mode =
        matches!(child, Node::Null | Node::Sequence(_)) && is_array_segment(next);
    debug!(segment = next, remaining = remaining.len(), array_mode, "updated child");
    if array_mode {
        write_sequence(child, remaining, value)
    } else {
        write_map(child, remaining, value)
    }
}

fn write_map(node: Node, path: &[&str], value: &Node) -> Node {
    let Some((head, tail)) = path.split_first() else {
        return node;
    };

    let mut map = match node {
        Node::Mapping(map) => map,
        // Nothing to match against, so a splat leaves the node alone.
        other if *head == SPLAT => return other,
        _ => Mapping::new(),
    };

    if !map.iter().any(|(key, _)| matches_key(head, key)) {
        if *head == SPLAT {
            debug!("no entries for splat, mapping left as is");
            return Node::Mapping(map);
        }
        debug!(key = head, "appending entry");
        map.push(*head, Node::Null);
    }

    for (key, slot) in map.iter_mut() {
        if matches_key(head, key) {
            let current = mem::take(slot);
            *slot = updated_child(current, tail, value);
        }
    }
    Node::Mapping(map)
}

fn write_sequence(node: Node, path: &[&str], value: &Node) -> Node {
    let Some((head, tail)) = path.split_first() else {
        return node;
    };

    let mut items = match node {
        Node::Sequence(items) => items,
        _ => Vec::new(),
    };

    let index = match *head {
        APPEND => items.len(),
        SPLAT => {
            for item in items.iter_mut() {
                let current = mem::take(item);
                *item = updated_child(current, tail, value);
            }
            return Node::Sequence(items);
        }
        // `updated_child` only routes array segments here.
        other => match parse_index(other) {
            Some(index) => index,
            None => return Node::Sequence(items),
        },
    };

    if index >= items.len() {
        let padded = index
            .checked_add(1)
            .filter(|len| items.try_reserve_exact(len - items.len()).is_ok());
        let Some(len) = padded else {
            warn!(index, len = items.len(), "index cannot be padded up to");
            return Node::Sequence(items);
        };
        debug!(index, len = items.len(), "padding sequence");
        items.resize(len, Node::Null);
    }
    let current = mem::take(&mut items[index]);
    items[index] = updated_child(current, tail, value);
    Node::Sequence(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Node {
        Node::from(value)
    }

    #[test]
    fn test_write_empty_path_is_noop() {
        let tree = doc(json!({"a": 1}));
        assert_eq!(write::<&str>(tree.clone(), &[], Node::from(2)), tree);
    }

    #[test]
    fn test_write_replaces_existing_in_place() {
        let tree = doc(json!({"a": 1, "b": 2, "c": 3}));
        let out = write(tree, &["b"], Node::from("x"));
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"a":1,"b":"x","c":3}"#);
    }

    #[test]
    fn test_write_appends_missing_key_last() {
        let tree = doc(json!({"b": 1, "a": 2}));
        let out = write(tree, &["c"], Node::from(3));
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn test_write_scalar_becomes_mapping() {
        let tree = doc(json!({"a": "leaf"}));
        let out = write(tree, &["a", "b"], Node::from(1));
        assert_eq!(out, doc(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_write_existing_mapping_wins_over_index() {
        let tree = doc(json!({"a": {"x": 1}}));
        let out = write(tree, &["a", "0"], Node::from(2));
        assert_eq!(out, doc(json!({"a": {"x": 1, "0": 2}})));
    }

    #[test]
    fn test_write_sequence_with_key_becomes_mapping() {
        let tree = doc(json!({"a": [1, 2]}));
        let out = write(tree, &["a", "k"], Node::from(3));
        assert_eq!(out, doc(json!({"a": {"k": 3}})));
    }

    #[test]
    fn test_write_splat_on_empty_mapping_is_noop() {
        let tree = doc(json!({"a": {}}));
        assert_eq!(write(tree.clone(), &["a", "*", "b"], Node::from(1)), tree);
    }

    #[test]
    fn test_write_splat_on_scalar_is_noop() {
        let tree = doc(json!({"a": 5}));
        assert_eq!(write(tree.clone(), &["a", "*"], Node::from(1)), tree);
    }

    #[test]
    fn test_write_prefix_fans_out() {
        let tree = doc(json!({"foo1": {"v": 0}, "bar": {"v": 0}, "foo2": {"v": 0}}));
        let out = write(tree, &["foo*", "v"], Node::from(1));
        assert_eq!(
            out,
            doc(json!({"foo1": {"v": 1}, "bar": {"v": 0}, "foo2": {"v": 1}}))
        );
    }

    #[test]
    fn test_write_prefix_without_match_creates_literal_key() {
        let tree = doc(json!({"bar": 1}));
        let out = write(tree, &["foo*"], Node::from(2));
        assert_eq!(out, doc(json!({"bar": 1, "foo*": 2})));
    }

    #[test]
    fn test_write_array_splat_touches_existing_only() {
        let tree = doc(json!({"list": [{"a": 1}, {"a": 2}]}));
        let out = write(tree, &["list", "*", "a"], Node::from(0));
        assert_eq!(out, doc(json!({"list": [{"a": 0}, {"a": 0}]})));
    }

    #[test]
    fn test_write_array_splat_on_null_yields_empty_sequence() {
        let tree = doc(json!({"list": null}));
        let out = write(tree, &["list", "*", "a"], Node::from(0));
        assert_eq!(out, doc(json!({"list": []})));
    }

    #[test]
    fn test_write_pads_with_nulls() {
        let tree = doc(json!({"list": [1]}));
        let out = write(tree, &["list", "3"], Node::from(4));
        assert_eq!(out, doc(json!({"list": [1, null, null, 4]})));
    }

    #[test]
    fn test_write_unaddressable_index_leaves_sequence() {
        let out = write(Node::Null, &[usize::MAX.to_string()], Node::from(1));
        assert_eq!(out, Node::Sequence(vec![]));

        let tree = doc(json!({"list": [1]}));
        for index in [usize::MAX, usize::MAX - 1, usize::MAX / 2] {
            let out = write(tree.clone(), &["list".to_string(), index.to_string()], Node::from(2));
            assert_eq!(out, tree, "index {index}");
        }
    }

    #[test]
    fn test_write_sequence_root() {
        let out = write(Node::Null, &["1", "name"], Node::from("n"));
        assert_eq!(out, doc(json!([null, {"name": "n"}])));
    }

    #[test]
    fn test_write_duplicate_keys_all_updated() {
        let tree: Node = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let out = write(tree, &["a"], Node::from(0));
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"a":0,"b":2,"a":0}"#);
    }
}
