//! File format handlers
//!
//! These are the untyped, on-disk shapes. The schema-bound model in
//! [`crate::model`] and the entity layer in [`crate::gamedata`] build on them.

pub mod common;
pub mod loca;
pub mod lsx;
pub mod stats;

pub use common::{DataType, Shape};
pub use lsx::{LsxAttribute, LsxDocument, LsxNode, LsxRegion};
