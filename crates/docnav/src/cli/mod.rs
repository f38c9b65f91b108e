//! Command logic behind the `docnav` binary.
//!
//! - `read`: print the value(s) a path resolves to
//! - `write`: set a value at a path, or apply a script of writes
//! - `delete`: remove the entry or element a path resolves to
//! - `new`: build a fresh document holding one value

use std::fs;
use std::io::{self, Read};

use docnav_path::{delete, format_path, read, split_path, write, Mapping, NavError, Node};
use thiserror::Error;
use tracing::debug;

/// Source/target name meaning stdin.
pub const STDIN: &str = "-";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{target}: {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: NavError,
    },
    #[error("script must be a mapping of path expressions to values")]
    Script,
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

// ── Documents ─────────────────────────────────────────────────────────────

/// Read document text from a file, or from stdin when `source` is `-`.
pub fn load(source: &str) -> Result<String, CliError> {
    let io_err = |source_err| CliError::Io {
        target: source.to_string(),
        source: source_err,
    };
    if source == STDIN {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    fs::read_to_string(source).map_err(io_err)
}

/// Overwrite `target` with `text` followed by a newline.
pub fn store(target: &str, text: &str) -> Result<(), CliError> {
    let mut contents = String::with_capacity(text.len() + 1);
    contents.push_str(text);
    contents.push('\n');
    fs::write(target, contents).map_err(|source| CliError::Io {
        target: target.to_string(),
        source,
    })
}

/// Parse JSON text into a tree, keeping duplicate keys.
///
/// Blank input is an empty document (`null`).
pub fn read_document(text: &str) -> Result<Node, CliError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Node::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Serialize a tree as pretty or single-line JSON.
pub fn render(node: &Node, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };
    Ok(text)
}

// ── Values ────────────────────────────────────────────────────────────────

/// Interpret a value given on the command line.
///
/// A value wrapped in double quotes is always the string between them.
/// Otherwise integers, finite floats, `true`, `false`, `null`, `[]` and
/// `{}` are recognised and anything else is taken as a plain string.
///
/// # Example
///
/// ```
/// use docnav::cli::parse_value;
/// use docnav::path::Node;
///
/// assert_eq!(parse_value("12"), Node::from(12));
/// assert_eq!(parse_value("\"12\""), Node::from("12"));
/// assert_eq!(parse_value("yes"), Node::from("yes"));
/// ```
pub fn parse_value(arg: &str) -> Node {
    if let Some(inner) = arg.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Node::from(inner);
    }
    if let Ok(n) = arg.parse::<i64>() {
        return Node::from(n);
    }
    if let Ok(n) = arg.parse::<f64>() {
        if n.is_finite() {
            return Node::from(n);
        }
    }
    match arg {
        "true" => Node::Bool(true),
        "false" => Node::Bool(false),
        "null" => Node::Null,
        "[]" => Node::Sequence(Vec::new()),
        "{}" => Node::Mapping(Mapping::new()),
        other => Node::from(other),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Resolve a path expression, collapsing fan-out into a sequence and a
/// missing target into `null`.
///
/// # Errors
///
/// - `CliError::Read` - a sequence on the way was addressed by a non-index.
///   The error names the path in normalized form.
pub fn read_path(doc: &Node, expr: &str) -> Result<Node, CliError> {
    let segments = split_path(expr);
    debug!(path = %format_path(&segments), "read");
    read(doc, &segments)
        .map(|found| found.into_node())
        .map_err(|source| CliError::Read {
            path: format_path(&segments),
            source,
        })
}

pub fn write_path(doc: Node, expr: &str, value: Node) -> Node {
    let segments = split_path(expr);
    debug!(path = %format_path(&segments), "write");
    write(doc, &segments, value)
}

pub fn delete_path(doc: Node, expr: &str) -> Node {
    let segments = split_path(expr);
    debug!(path = %format_path(&segments), "delete");
    delete(doc, &segments)
}

/// Build a document from nothing but one value at a path.
pub fn new_document(expr: &str, value: Node) -> Node {
    write_path(Node::Null, expr, value)
}

/// Apply every write of a script, in order.
///
/// A script is a mapping from path expression to value. Each entry is an
/// independent write against the result of the previous one.
///
/// # Errors
///
/// - `CliError::Script` - the script is not a mapping.
pub fn apply_script(doc: Node, script: Node) -> Result<Node, CliError> {
    let Node::Mapping(writes) = script else {
        return Err(CliError::Script);
    };
    debug!(writes = writes.len(), "applying script");
    Ok(writes
        .into_iter()
        .fold(doc, |doc, (expr, value)| write_path(doc, &expr.key_text(), value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Node {
        read_document(text).unwrap()
    }

    #[test]
    fn test_parse_value_scalars() {
        assert_eq!(parse_value("-3"), Node::from(-3));
        assert_eq!(parse_value("2.5"), Node::from(2.5));
        assert_eq!(parse_value("true"), Node::Bool(true));
        assert_eq!(parse_value("false"), Node::Bool(false));
        assert_eq!(parse_value("null"), Node::Null);
    }

    #[test]
    fn test_parse_value_collections() {
        assert_eq!(parse_value("[]"), Node::Sequence(vec![]));
        assert_eq!(parse_value("{}"), Node::Mapping(Mapping::new()));
    }

    #[test]
    fn test_parse_value_strings() {
        assert_eq!(parse_value("hello"), Node::from("hello"));
        assert_eq!(parse_value("\"true\""), Node::from("true"));
        assert_eq!(parse_value("\"\""), Node::from(""));
        assert_eq!(parse_value("\""), Node::from("\""));
        assert_eq!(parse_value("nan"), Node::from("nan"));
        assert_eq!(parse_value("inf"), Node::from("inf"));
    }

    #[test]
    fn test_read_document_blank_is_null() {
        assert_eq!(read_document("  \n").unwrap(), Node::Null);
    }

    #[test]
    fn test_read_document_invalid() {
        assert!(matches!(read_document("{"), Err(CliError::Json(_))));
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let node = doc(r#"{"a":[1]}"#);
        assert_eq!(render(&node, false).unwrap(), r#"{"a":[1]}"#);
        assert_eq!(render(&node, true).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_read_path_missing_is_null() {
        assert_eq!(read_path(&doc(r#"{"a":1}"#), "b.c").unwrap(), Node::Null);
    }

    #[test]
    fn test_read_path_malformed_index() {
        let err = read_path(&doc(r#"{"a":[1]}"#), "a.b").unwrap_err();
        assert!(matches!(err, CliError::Read { source: NavError::MalformedIndex(_), .. }));
    }

    #[test]
    fn test_read_path_error_names_normalized_path() {
        let tree = doc(r#"{"a.b":{"list":[1]}}"#);
        let err = read_path(&tree, r#""a.b"."list".x"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#""a.b".list.x: MALFORMED_INDEX: "x" is not an array index"#
        );
    }

    #[test]
    fn test_new_document() {
        let out = new_document("a.b[0]", Node::from("x"));
        assert_eq!(render(&out, false).unwrap(), r#"{"a":{"b":["x"]}}"#);
    }

    #[test]
    fn test_apply_script_in_order() {
        let script = doc(r#"{"a.list[+]": 1, "a.list[+]": 2, "b": {"c": true}}"#);
        let out = apply_script(doc("{}"), script).unwrap();
        assert_eq!(
            render(&out, false).unwrap(),
            r#"{"a":{"list":[1,2]},"b":{"c":true}}"#
        );
    }

    #[test]
    fn test_apply_script_rejects_non_mapping() {
        assert!(matches!(
            apply_script(doc("{}"), doc("[1]")),
            Err(CliError::Script)
        ));
    }
}
