use crate::node::Node;

/// Matches every entry of a mapping or every element of a sequence.
pub const SPLAT: &str = "*";

/// Addresses the next free index of a sequence.
pub const APPEND: &str = "+";

/// Check whether a mapping key satisfies a path segment.
///
/// A segment ending in `*` is a prefix match against the key text, so a
/// bare `*` matches any key. Anything else must equal the key text exactly.
///
/// # Example
///
/// ```
/// use docnav_path::{matches_key, Node};
///
/// assert!(matches_key("foo*", &Node::from("foobar")));
/// assert!(matches_key("*", &Node::from(12)));
/// assert!(matches_key("12", &Node::from(12)));
/// assert!(!matches_key("foo", &Node::from("foobar")));
/// ```
pub fn matches_key(segment: &str, key: &Node) -> bool {
    let text = key.key_text();
    match segment.strip_suffix('*') {
        Some(prefix) => text.starts_with(prefix),
        None => text == segment,
    }
}

/// Parse a segment as a non-negative base-10 array index.
///
/// Leading zeros are accepted. Signs, whitespace and values that do not fit
/// `usize` are not.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Check whether a segment reads as an array operation: an index, the
/// append marker or the splat.
///
/// # Example
///
/// ```
/// use docnav_path::is_array_segment;
///
/// assert!(is_array_segment("0"));
/// assert!(is_array_segment("+"));
/// assert!(is_array_segment("*"));
/// assert!(!is_array_segment("-1"));
/// assert!(!is_array_segment("key"));
/// ```
pub fn is_array_segment(segment: &str) -> bool {
    segment == APPEND || segment == SPLAT || parse_index(segment).is_some()
}
