//! Path expressions.
//!
//! A path expression is a dotted list of keys with array operators in
//! brackets, e.g. `server.listeners[0].port` or `items[+]`. Keys holding a
//! `.` or `[` are written in double quotes: `"example.com".port`. There is
//! no escaping inside quotes.

use crate::util::is_array_segment;

/// Split a path expression into segments.
///
/// The empty expression addresses the root and yields no segments.
///
/// # Example
///
/// ```
/// use docnav_path::split_path;
///
/// assert_eq!(split_path("a.b[0].c"), vec!["a", "b", "0", "c"]);
/// assert_eq!(split_path("list[+]"), vec!["list", "+"]);
/// assert_eq!(split_path(r#""a.b".c"#), vec!["a.b", "c"]);
/// assert!(split_path("").is_empty());
/// ```
pub fn split_path(expr: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = expr;
    while !rest.is_empty() {
        let (segment, tail) = next_segment(rest);
        segments.push(segment.to_string());
        rest = tail;
    }
    segments
}

fn next_segment(expr: &str) -> (&str, &str) {
    if let Some(inner) = expr.strip_prefix('[') {
        return take_until(inner, ']');
    }
    if let Some(inner) = expr.strip_prefix('"') {
        return take_until(inner, '"');
    }
    match expr.find(['.', '[']) {
        Some(i) if expr.as_bytes()[i] == b'.' => (&expr[..i], &expr[i + 1..]),
        Some(i) => (&expr[..i], &expr[i..]),
        None => (expr, ""),
    }
}

/// Cut at `close` and drop a single `.` separator following it.
fn take_until(expr: &str, close: char) -> (&str, &str) {
    match expr.find(close) {
        Some(i) => {
            let tail = &expr[i + close.len_utf8()..];
            (&expr[..i], tail.strip_prefix('.').unwrap_or(tail))
        }
        None => (expr, ""),
    }
}

/// Format segments back into a path expression.
///
/// Array operators are bracketed. Keys that are empty or hold a `.` or `[`
/// are quoted. A key holding a `"` is written as is and does not split back
/// to the same segment, since quotes have no escape.
///
/// # Example
///
/// ```
/// use docnav_path::format_path;
///
/// let segments = ["a", "0", "b.c", "+"].map(String::from);
/// assert_eq!(format_path(&segments), r#"a[0]."b.c"[+]"#);
/// ```
pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if is_array_segment(segment) {
            out.push('[');
            out.push_str(segment);
            out.push(']');
            continue;
        }
        if !out.is_empty() {
            out.push('.');
        }
        if segment.is_empty() || segment.contains(['.', '[']) {
            out.push('"');
            out.push_str(segment);
            out.push('"');
        } else {
            out.push_str(segment);
        }
    }
    out
}
