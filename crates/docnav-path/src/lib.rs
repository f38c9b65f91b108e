//! Path-addressed navigation over document trees.
//!
//! A document is a [`Node`] tree whose mappings keep their entries in order
//! and may repeat keys. A path is a list of segments, usually produced by
//! [`split_path`]. Each segment is one of:
//!
//! - a key, `name`, matching entries whose key text is exactly `name`
//! - a prefix key, `name*`, matching every key starting with `name`
//! - `*`, matching every entry of a mapping or every element of a sequence
//! - an index, `3`, addressing a sequence element
//! - `+`, addressing the slot just past the end of a sequence
//!
//! Whether a segment is used as a key or an array operator depends on the
//! node it is applied to, not on its spelling alone.
//!
//! # Example
//!
//! ```
//! use docnav_path::{delete, read, split_path, write, Node, ReadResult};
//! use serde_json::json;
//!
//! let doc = Node::from(json!({"list": [1, 2]}));
//!
//! let doc = write(doc, &split_path("list[+]"), Node::from(9));
//! assert_eq!(doc, Node::from(json!({"list": [1, 2, 9]})));
//!
//! let doc = delete(doc, &split_path("list[0]"));
//! assert_eq!(
//!     read(&doc, &split_path("list[0]")).unwrap(),
//!     ReadResult::One(Node::from(2))
//! );
//! ```

use thiserror::Error;

pub mod node;
pub use node::{Mapping, Node};

pub mod types;
pub use types::{Path, ReadResult, Segment};

pub mod util;
pub use util::{is_array_segment, matches_key, parse_index, APPEND, SPLAT};

pub mod path;
pub use path::{format_path, split_path};

mod read;
pub use read::read;

mod write;
pub use write::write;

mod delete;
pub use delete::delete;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    /// A sequence was addressed by a segment that is not an index.
    #[error("MALFORMED_INDEX: {0:?} is not an array index")]
    MalformedIndex(String),
}
