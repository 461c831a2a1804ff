//! Compact configuration tree blob handling
//!
//! A blob encodes a tree of named nodes carrying typed properties within a single, linear, pointerless byte buffer.
//! It consists of a fixed 9 byte prefix followed by a flat stream of variable-length records.
//! All multi-byte integers are stored little-endian.
//!
//! ```text
//! ┌──────────────────────────┐ 0
//! │ magic (3 bytes, "fdt")   │
//! ├──────────────────────────┤ 3
//! │ version (3 bytes)        │
//! ├──────────────────────────┤ 6
//! │ root record  00 '/' 00   │
//! ├──────────────────────────┤ 9
//! │ node / property records  │
//! │ …                        │
//! └──────────────────────────┘ buf.len()
//! ```
//!
//! A *node record* is a level byte (`0x00..=0xfe`) followed by the null-terminated node name.
//! The level is the depth of the node inside the tree and is the only thing that encodes structure:
//! records appear in pre-order and each one is attached relative to the node decoded before it.
//!
//! A *property record* is the byte `0xff` followed by the null-terminated property name and a tagged value
//! (see [`PropValue`] for the tag byte encoding).
//! Properties belong to the node decoded most recently.
//!
//! # Example
//!
//! ```rust
//! # use blob_tree::blob::Tree;
//! # static BLOB: &[u8] = include_bytes!("../../test/data/sample.blob");
//! let tree = Tree::load(BLOB).unwrap();
//! assert_eq!(tree.version(), 0x240101);
//! assert_eq!(tree.root().children().nth(0).unwrap().name(), "node1");
//! assert_eq!(tree.read_string_by_path("/node1", "string"), Ok("test_string"));
//! ```
//!

mod accessors;
mod dump;
mod header;
mod list;
mod node;
mod path;
#[cfg(test)]
mod test_util;
mod tree;
mod value;

pub use accessors::AccessError;
pub use dump::NodeDump;
pub use header::{BlobHeader, HeaderReadError, HEADER_MAGIC, STREAM_OFFSET};
pub use list::{Link, ListIter, LinkedSlab};
pub use node::{Node, NodeId, NodeIter, PropId, Property, PropertyIter};
pub use tree::{DecodeError, Tree};
pub use value::{PropType, PropValue, ValueError};
