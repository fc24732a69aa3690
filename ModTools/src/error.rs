//! Error types for `ModTools`

use thiserror::Error;

use crate::formats::common::DataType;

/// The error type for `ModTools` operations.
///
/// Every validation failure is fatal: callers propagate these with `?`
/// and abort the build rather than emit partially valid output.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Schema Violations ====================
    /// An attribute name that the node's schema does not declare.
    #[error("node '{node}' has no attribute '{attribute}'")]
    UnknownAttribute {
        /// The node kind.
        node: String,
        /// The rejected attribute name.
        attribute: String,
    },

    /// The schema's key attribute was not supplied.
    #[error("node '{node}' is missing its key attribute '{attribute}'")]
    MissingKeyAttribute {
        /// The node kind.
        node: String,
        /// The key attribute name.
        attribute: String,
    },

    /// One or more children are of a kind the container does not allow.
    #[error("'{parent}' cannot contain children of kind {}", .kinds.join(", "))]
    DisallowedChildren {
        /// The containing node or document.
        parent: String,
        /// Every offending child kind, in encounter order.
        kinds: Vec<String>,
    },

    /// A value of the wrong storage shape for the attribute's type.
    #[error("attribute '{attribute}' of type {data_type} cannot hold {found}")]
    AttributeShape {
        /// The attribute name, or empty when not yet bound to a name.
        attribute: String,
        /// The declared type.
        data_type: DataType,
        /// The shape that was supplied or requested.
        found: &'static str,
    },

    /// An XML attribute whose `type` disagrees with the schema.
    #[error("attribute '{attribute}' on node '{node}' has type '{found}', expected '{expected}'")]
    TypeMismatch {
        /// The node kind.
        node: String,
        /// The attribute name.
        attribute: String,
        /// The XML type name the schema requires.
        expected: &'static str,
        /// The XML type name found in the file.
        found: String,
    },

    /// A handle attribute without a handle in the XML.
    #[error("attribute '{attribute}' on node '{node}' is missing its handle")]
    MissingHandle {
        /// The node kind.
        node: String,
        /// The attribute name.
        attribute: String,
    },

    /// A node id that does not match the expected schema.
    #[error("expected node '{expected}', found '{found}'")]
    NodeIdMismatch {
        /// The schema's node id.
        expected: String,
        /// The id in the file.
        found: String,
    },

    /// A child `<node>` whose id matches no declared child schema.
    #[error("'{parent}' has no child kind '{id}'")]
    UnknownChildKind {
        /// The containing node or document.
        parent: String,
        /// The unmatched node id.
        id: String,
    },

    // ==================== Document Wrapper Errors ====================
    /// The document's region or root id differs from what was declared.
    #[error("expected {what} '{expected}', found '{found}'")]
    WrapperMismatch {
        /// Which wrapper element ("region" or "root node").
        what: &'static str,
        /// The declared id.
        expected: String,
        /// The id in the file.
        found: String,
    },

    /// A required wrapper element is absent.
    #[error("missing <{element}> in {context}")]
    MissingElement {
        /// The element name.
        element: &'static str,
        /// Where it was expected.
        context: String,
    },

    /// An element where the wrapper allows no more of its kind.
    #[error("unexpected <{element}> in {context}")]
    UnexpectedElement {
        /// The element name.
        element: &'static str,
        /// Where it appeared.
        context: String,
    },

    // ==================== Stats / Gamedata Errors ====================
    /// A member name not declared for the entity's kind in Modifiers.txt.
    #[error("entity '{entity}' has member '{member}' which is not valid for {kind}")]
    UnknownMember {
        /// The entity name.
        entity: String,
        /// The rejected member name.
        member: String,
        /// The entity kind.
        kind: String,
    },

    /// A member value not listed in the member's valuelist.
    #[error("entity '{entity}': value '{value}' is not allowed for {member} on {kind}")]
    InvalidValue {
        /// The entity name.
        entity: String,
        /// The rejected literal.
        value: String,
        /// The member name.
        member: String,
        /// The entity kind.
        kind: String,
    },

    /// An entity kind with no modifier table or no output file rule.
    #[error("unknown entity kind '{0}'")]
    UnknownEntityKind(String),

    /// Two entities with the same name in one collection.
    #[error("duplicate entity '{0}'")]
    DuplicateEntity(String),

    /// A spell or status entity without the member that selects its output file.
    #[error("entity '{entity}' needs '{member}' to be filed")]
    MissingFilingMember {
        /// The entity name.
        entity: String,
        /// The member that selects the output file.
        member: &'static str,
    },

    /// A malformed line in a line-oriented text file.
    #[error("{file}:{line}: cannot parse '{text}'")]
    Parse {
        /// The file (or source label) being parsed.
        file: String,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    // ==================== Localization Errors ====================
    /// A registered language with no text for a key.
    #[error("localization key '{key}' has no '{language}' translation")]
    MissingTranslation {
        /// The localization key.
        key: String,
        /// The short language name.
        language: String,
    },

    /// Text supplied for a language that was never registered.
    #[error("localization key '{key}' uses unregistered language '{language}'")]
    UnregisteredLanguage {
        /// The localization key.
        key: String,
        /// The short language name.
        language: String,
    },

    /// Lookup of a localization key that was never set.
    #[error("unknown localization key '{0}'")]
    UnknownLocalizationKey(String),

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

/// A specialized Result type for `ModTools` operations.
pub type Result<T> = std::result::Result<T, Error>;
