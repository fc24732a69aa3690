//! Utility functions

pub mod hash;
pub mod text;

pub use hash::{loca_handle, name_uuid};
pub use text::normalize_text;
