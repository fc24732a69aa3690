//! LSX (XML) format module
//!
//! Untyped reading and writing. Schema validation happens in [`crate::model`].

mod document;
mod reader;
mod writer;

pub use document::{DEFAULT_VERSION, LsxAttribute, LsxDocument, LsxNode, LsxRegion, LsxVersion};
pub use reader::{parse_lsx, read_lsx};
pub use writer::{serialize_lsx, write_lsx};
