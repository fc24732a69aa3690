//! Localization content list format
//!
//! One `<language>.loca.xml` per language: a `<contentList>` of
//! `<content contentuid="..." version="...">` entries.

mod writer;

pub use writer::{serialize_loca_xml, write_loca_xml};

/// A single localized text entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    /// Content handle (e.g., "h1234abcdg...")
    pub key: String,
    /// Version number
    pub version: u16,
    /// The localized text content
    pub text: String,
}

/// A collection of localized text entries for one language
#[derive(Debug, Clone, Default)]
pub struct LocaResource {
    pub entries: Vec<LocalizedText>,
}

impl LocaResource {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
}
