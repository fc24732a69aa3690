//! Common type handling shared by the LSX and stats formats

mod types;

pub use types::{DataType, Shape};
