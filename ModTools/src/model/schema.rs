//! Node kind declarations
//!
//! A [`Schema`] is declared once per node kind and shared through `Arc` by
//! every instance. It cannot be changed after [`SchemaBuilder::build`].

use std::sync::Arc;

use indexmap::IndexMap;

use crate::formats::common::DataType;

/// The legal shape of one node kind.
#[derive(Debug)]
pub struct Schema {
    id: String,
    key: Option<String>,
    attributes: IndexMap<String, DataType>,
    children: Vec<Arc<Schema>>,
}

/// Declares a [`Schema`].
///
/// ```
/// use modtools::formats::DataType;
/// use modtools::model::Schema;
///
/// let subclass = Schema::builder("SubClass")
///     .attribute("Object", DataType::Guid)
///     .build();
/// let progression = Schema::builder("Progression")
///     .key("UUID", DataType::Guid)
///     .attribute("Level", DataType::UInt8)
///     .attribute("Selectors", DataType::StringList)
///     .child(&subclass)
///     .build();
///
/// assert_eq!(progression.key(), Some("UUID"));
/// assert!(progression.child_schema("SubClass").is_some());
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    id: String,
    key: Option<String>,
    attributes: IndexMap<String, DataType>,
    children: Vec<Arc<Schema>>,
}

impl SchemaBuilder {
    /// Declare the key attribute. It is also declared as a regular attribute
    /// and becomes mandatory on every instance.
    #[must_use]
    pub fn key(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        self.attributes.insert(name.clone(), data_type);
        self.key = Some(name);
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.attributes.insert(name.into(), data_type);
        self
    }

    /// Allow instances of `child` under this node kind.
    #[must_use]
    pub fn child(mut self, child: &Arc<Schema>) -> Self {
        if !self.children.iter().any(|c| c.id == child.id) {
            self.children.push(Arc::clone(child));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            id: self.id,
            key: self.key,
            attributes: self.attributes,
            children: self.children,
        })
    }
}

impl Schema {
    /// Start declaring a node kind with the given `<node id>`.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            id: id.into(),
            key: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// The node kind's identifying name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The designated key attribute, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// All declared attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, DataType> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute_type(&self, name: &str) -> Option<DataType> {
        self.attributes.get(name).copied()
    }

    /// Allowed child node kinds.
    #[must_use]
    pub fn children(&self) -> &[Arc<Schema>] {
        &self.children
    }

    /// Look up an allowed child kind by `<node id>`.
    #[must_use]
    pub fn child_schema(&self, id: &str) -> Option<&Arc<Schema>> {
        self.children.iter().find(|c| c.id == id)
    }
}

/// Node kinds are identified by their id.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Schema {}
