//! Schema-driven `.lsx` content model
//!
//! Declare a [`Schema`] once per node kind, build [`Node`]s against it, and
//! collect them into a [`Document`] that reads and writes `.lsx` files.

pub mod attribute;
pub mod children;
pub mod document;
pub mod node;
pub mod schema;

pub use attribute::{AttrValue, Attribute, AttributeValue, Value};
pub use children::{Children, by_key};
pub use document::{Document, DocumentSchema};
pub use node::{Node, NodeBuilder};
pub use schema::{Schema, SchemaBuilder};
