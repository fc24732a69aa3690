//! Error types for `ModDB`

use thiserror::Error;

/// The error type for `ModDB` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("ModTools error: {0}")]
    ModTools(#[from] modtools::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("manifest write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest field that parses but is not usable.
    #[error("invalid manifest field '{field}': {reason}")]
    Manifest {
        field: &'static str,
        reason: String,
    },

    /// Stats entities were added to a mod with no `[schema]` configured.
    #[error("no Modifiers.txt/ValueLists.txt configured; cannot validate stats entities")]
    NoStatsSchema,

    /// Base game data was requested but no cache directory is configured.
    #[error("no base data cache directory configured")]
    NoBaseData,

    /// An `.lsx` document registered twice at the same output path.
    #[error("document already registered at '{0}'")]
    DuplicateDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
