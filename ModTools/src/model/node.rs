//! Schema-bound node instances

use std::sync::Arc;

use indexmap::IndexMap;

use super::attribute::{AttrValue, Attribute};
use super::children::Children;
use super::schema::Schema;
use crate::error::{Error, Result};
use crate::formats::lsx::LsxNode;

/// An instance of a [`Schema`]: typed attributes plus typed children.
///
/// A node never holds an attribute its schema does not declare, never holds
/// a child of an undeclared kind, and always carries its key attribute.
#[derive(Debug, Clone)]
pub struct Node {
    schema: Arc<Schema>,
    attributes: IndexMap<String, Attribute>,
    children: Children,
}

/// Attribute order is not significant for equality.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        *self.schema == *other.schema
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

/// Collects attributes and children, then validates them all in
/// [`NodeBuilder::build`].
#[derive(Debug)]
pub struct NodeBuilder {
    schema: Arc<Schema>,
    attributes: Vec<(String, AttrValue)>,
    children: Vec<Node>,
}

impl NodeBuilder {
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Validate and construct.
    ///
    /// # Errors
    /// Fails on an undeclared attribute, a value of the wrong shape, a child
    /// of an undeclared kind, or a missing key attribute.
    pub fn build(self) -> Result<Node> {
        let mut node = Node::empty(self.schema);
        node.children.extend(self.children)?;
        for (name, value) in self.attributes {
            node.set(name, value)?;
        }
        node.check_key()?;
        Ok(node)
    }
}

fn named(err: Error, name: &str) -> Error {
    match err {
        Error::AttributeShape {
            data_type, found, ..
        } => Error::AttributeShape {
            attribute: name.to_string(),
            data_type,
            found,
        },
        other => other,
    }
}

impl Node {
    /// Start building an instance of `schema`.
    #[must_use]
    pub fn builder(schema: &Arc<Schema>) -> NodeBuilder {
        NodeBuilder {
            schema: Arc::clone(schema),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn empty(schema: Arc<Schema>) -> Self {
        let children = Children::new(schema.id(), schema.children());
        Node {
            schema,
            attributes: IndexMap::new(),
            children,
        }
    }

    fn check_key(&self) -> Result<()> {
        match self.schema.key() {
            Some(key) if !self.attributes.contains_key(key) => Err(Error::MissingKeyAttribute {
                node: self.schema.id().to_string(),
                attribute: key.to_string(),
            }),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The node kind (`<node id>`).
    #[must_use]
    pub fn id(&self) -> &str {
        self.schema.id()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    /// Scalar value of `name`, if set and scalar.
    #[must_use]
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|a| a.as_str().ok())
    }

    /// List value of `name`, if set and a list.
    #[must_use]
    pub fn list_value(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(|a| a.as_list().ok())
    }

    /// Scalar value of the schema's key attribute.
    #[must_use]
    pub fn key_value(&self) -> Option<&str> {
        self.schema.key().and_then(|key| self.str_value(key))
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set or replace an attribute, coercing to its declared type.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
        let name = name.into();
        let data_type = self
            .schema
            .attribute_type(&name)
            .ok_or_else(|| Error::UnknownAttribute {
                node: self.schema.id().to_string(),
                attribute: name.clone(),
            })?;
        let attribute = Attribute::from_input(data_type, value.into()).map_err(|e| named(e, &name))?;
        self.attributes.insert(name, attribute);
        Ok(())
    }

    /// Remove an attribute. The key attribute cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<Option<Attribute>> {
        if self.schema.key() == Some(name) {
            return Err(Error::MissingKeyAttribute {
                node: self.schema.id().to_string(),
                attribute: name.to_string(),
            });
        }
        Ok(self.attributes.shift_remove(name))
    }

    /// Append elements to a list attribute, creating it when absent.
    pub fn extend_list<I, S>(&mut self, name: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.attributes.contains_key(name) {
            self.set(name, Vec::<String>::new())?;
        }
        let attribute = self.attributes.get_mut(name).ok_or_else(|| Error::UnknownAttribute {
            node: self.schema.id().to_string(),
            attribute: name.to_string(),
        })?;
        attribute
            .list_mut()
            .map_err(|e| named(e, name))?
            .extend(items.into_iter().map(Into::into));
        Ok(())
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Append a child of an allowed kind.
    pub fn add_child(&mut self, node: Node) -> Result<()> {
        self.children.push(node)
    }

    /// Load from an `.lsx` node, recursing into children.
    ///
    /// # Errors
    /// Fails if the id differs from the schema, an attribute is undeclared or
    /// has a different XML type, or a child id matches no declared kind.
    pub fn from_lsx(schema: &Arc<Schema>, raw: &LsxNode) -> Result<Node> {
        if raw.id != schema.id() {
            return Err(Error::NodeIdMismatch {
                expected: schema.id().to_string(),
                found: raw.id.clone(),
            });
        }

        let mut node = Node::empty(Arc::clone(schema));
        for raw_attr in &raw.attributes {
            let data_type = schema
                .attribute_type(&raw_attr.id)
                .ok_or_else(|| Error::UnknownAttribute {
                    node: schema.id().to_string(),
                    attribute: raw_attr.id.clone(),
                })?;
            if !data_type.accepts_xml_type(&raw_attr.type_name) {
                return Err(Error::TypeMismatch {
                    node: schema.id().to_string(),
                    attribute: raw_attr.id.clone(),
                    expected: data_type.xml_name(),
                    found: raw_attr.type_name.clone(),
                });
            }
            let attribute = Attribute::from_lsx(data_type, raw_attr, schema.id())?;
            node.attributes.insert(raw_attr.id.clone(), attribute);
        }

        for raw_child in &raw.children {
            let child_schema =
                schema
                    .child_schema(&raw_child.id)
                    .ok_or_else(|| Error::UnknownChildKind {
                        parent: schema.id().to_string(),
                        id: raw_child.id.clone(),
                    })?;
            node.children.push(Node::from_lsx(child_schema, raw_child)?)?;
        }

        node.check_key()?;
        Ok(node)
    }

    /// Encode as an `.lsx` node. Attributes keep insertion order.
    #[must_use]
    pub fn to_lsx(&self) -> LsxNode {
        let mut raw = LsxNode::new(self.schema.id());
        raw.attributes = self
            .attributes
            .iter()
            .map(|(name, attr)| attr.to_lsx(name))
            .collect();
        raw.children = self.children.iter().map(Node::to_lsx).collect();
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::DataType;
    use crate::formats::lsx::LsxAttribute;
    use crate::model::attribute::AttributeValue;
    use pretty_assertions::assert_eq;

    fn schemas() -> (Arc<Schema>, Arc<Schema>) {
        let subclass = Schema::builder("SubClass")
            .attribute("Object", DataType::Guid)
            .build();
        let progression = Schema::builder("Progression")
            .key("UUID", DataType::Guid)
            .attribute("Level", DataType::UInt8)
            .attribute("Name", DataType::LSString)
            .attribute("Selectors", DataType::StringList)
            .attribute("Tags", DataType::CommaList)
            .attribute("DisplayName", DataType::TranslatedString)
            .child(&subclass)
            .build();
        (progression, subclass)
    }

    #[test]
    fn test_build_validates_attributes() {
        let (progression, _) = schemas();
        let err = Node::builder(&progression)
            .attr("UUID", "a")
            .attr("Colour", "red")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { ref attribute, .. } if attribute == "Colour"));
    }

    #[test]
    fn test_build_requires_key() {
        let (progression, _) = schemas();
        let err = Node::builder(&progression).attr("Level", 3u8).build().unwrap_err();
        assert!(matches!(err, Error::MissingKeyAttribute { .. }));
    }

    #[test]
    fn test_build_rejects_foreign_child() {
        let (progression, _) = schemas();
        let stranger = Schema::builder("Stranger").build();
        let err = Node::builder(&progression)
            .attr("UUID", "a")
            .child(Node::builder(&stranger).build().unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DisallowedChildren { .. }));
    }

    #[test]
    fn test_shape_error_names_attribute() {
        let (progression, _) = schemas();
        let err = Node::builder(&progression)
            .attr("UUID", "a")
            .attr("Level", vec!["1", "2"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::AttributeShape { ref attribute, .. } if attribute == "Level"));
    }

    #[test]
    fn test_extend_list_and_remove() {
        let (progression, _) = schemas();
        let mut node = Node::builder(&progression)
            .attr("UUID", "a")
            .attr("Selectors", "SelectSpells(x)")
            .build()
            .unwrap();

        node.extend_list("Selectors", ["AddSpells(y)"]).unwrap();
        node.extend_list("Tags", ["t1"]).unwrap();
        assert_eq!(node.list_value("Selectors").unwrap(), ["SelectSpells(x)", "AddSpells(y)"]);
        assert_eq!(node.list_value("Tags").unwrap(), ["t1"]);
        assert!(node.extend_list("Name", ["x"]).is_err());

        assert!(node.remove("UUID").is_err());
        assert!(node.remove("Tags").unwrap().is_some());
        assert!(node.get("Tags").is_none());
    }

    #[test]
    fn test_lsx_roundtrip_every_shape() {
        let (progression, subclass) = schemas();
        let original = Node::builder(&progression)
            .attr("UUID", "0c0ffee0-0000-4000-8000-000000000001")
            .attr("Level", 3u8)
            .attr("Name", "Fighter")
            .attr("Selectors", vec!["SelectSpells(a)", "AddSpells(b)", "SelectPassives(c)"])
            .attr("Tags", vec!["x", "y", "z"])
            .attr("DisplayName", AttrValue::handle("h1g2g3", 2))
            .child(
                Node::builder(&subclass)
                    .attr("Object", "0c0ffee0-0000-4000-8000-000000000002")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let raw = original.to_lsx();
        let reloaded = Node::from_lsx(&progression, &raw).unwrap();
        assert_eq!(reloaded, original);
        assert_eq!(
            reloaded.get("Tags").unwrap().raw(),
            &AttributeValue::List(vec!["x".into(), "y".into(), "z".into()])
        );
    }

    #[test]
    fn test_from_lsx_type_mismatch() {
        let (progression, _) = schemas();
        let mut raw = LsxNode::new("Progression");
        raw.attributes.push(LsxAttribute::new("UUID", "guid", "a"));
        raw.attributes.push(LsxAttribute::new("Level", "FixedString", "3"));
        let err = Node::from_lsx(&progression, &raw).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { expected: "uint8", .. }));
    }

    #[test]
    fn test_from_lsx_unknown_child() {
        let (progression, _) = schemas();
        let mut raw = LsxNode::new("Progression");
        raw.attributes.push(LsxAttribute::new("UUID", "guid", "a"));
        raw.children.push(LsxNode::new("Mystery"));
        let err = Node::from_lsx(&progression, &raw).unwrap_err();
        assert!(matches!(err, Error::UnknownChildKind { ref id, .. } if id == "Mystery"));
    }

    #[test]
    fn test_from_lsx_drops_empty_list_fragments() {
        let (progression, _) = schemas();
        let mut raw = LsxNode::new("Progression");
        raw.attributes.push(LsxAttribute::new("UUID", "guid", "a"));
        raw.attributes.push(LsxAttribute::new("Selectors", "LSString", ";A;;B;"));
        let node = Node::from_lsx(&progression, &raw).unwrap();
        assert_eq!(node.list_value("Selectors").unwrap(), ["A", "B"]);
    }
}
