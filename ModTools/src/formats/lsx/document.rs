//! Untyped LSX document structures
//!
//! A faithful tree of what an `.lsx` file contains, with no schema attached.

/// Default `<version>` written by the engine's own editor tooling.
pub const DEFAULT_VERSION: LsxVersion = LsxVersion {
    major: 4,
    minor: 0,
    revision: 9,
    build: 331,
};

/// The `<version>` element of an `.lsx` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsxVersion {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
    pub build: u32,
}

impl Default for LsxVersion {
    fn default() -> Self {
        DEFAULT_VERSION
    }
}

/// An LSX (Larian Save XML) document.
#[derive(Debug, Clone, Default)]
pub struct LsxDocument {
    /// Version header.
    pub version: LsxVersion,
    /// Document regions containing the data.
    pub regions: Vec<LsxRegion>,
}

/// A region in an LSX document.
#[derive(Debug, Clone)]
pub struct LsxRegion {
    /// Region identifier.
    pub id: String,
    /// Root nodes in this region.
    pub nodes: Vec<LsxNode>,
}

/// A node in an LSX document.
#[derive(Debug, Clone)]
pub struct LsxNode {
    /// Node identifier/type.
    pub id: String,
    /// Optional key for this node.
    pub key: Option<String>,
    /// Attributes on this node, in file order.
    pub attributes: Vec<LsxAttribute>,
    /// Child nodes.
    pub children: Vec<LsxNode>,
    /// Whether the node carried a `<children>` element, even an empty one.
    pub has_children_element: bool,
}

/// An attribute on an LSX node.
#[derive(Debug, Clone)]
pub struct LsxAttribute {
    /// Attribute identifier/name.
    pub id: String,
    /// Type name (e.g., "`FixedString`", "`int32`").
    pub type_name: String,
    /// String representation of the value.
    pub value: String,
    /// Localization handle for translated strings.
    pub handle: Option<String>,
    /// Version number for translated strings.
    pub version: Option<u32>,
}

impl LsxDocument {
    /// Creates an empty document with the default version header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a region by id.
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&LsxRegion> {
        self.regions.iter().find(|r| r.id == id)
    }
}

impl LsxNode {
    /// Creates a new LSX node with the given ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        LsxNode {
            id: id.into(),
            key: None,
            attributes: Vec::new(),
            children: Vec::new(),
            has_children_element: false,
        }
    }

    /// Find an attribute by id.
    #[must_use]
    pub fn attribute(&self, id: &str) -> Option<&LsxAttribute> {
        self.attributes.iter().find(|a| a.id == id)
    }
}

impl LsxAttribute {
    /// Creates a value-carrying attribute.
    #[must_use]
    pub fn new(id: impl Into<String>, type_name: impl Into<String>, value: impl Into<String>) -> Self {
        LsxAttribute {
            id: id.into(),
            type_name: type_name.into(),
            value: value.into(),
            handle: None,
            version: None,
        }
    }

    /// Creates a translated-string attribute.
    #[must_use]
    pub fn translated(
        id: impl Into<String>,
        type_name: impl Into<String>,
        handle: impl Into<String>,
        version: u32,
    ) -> Self {
        LsxAttribute {
            id: id.into(),
            type_name: type_name.into(),
            value: String::new(),
            handle: Some(handle.into()),
            version: Some(version),
        }
    }
}
