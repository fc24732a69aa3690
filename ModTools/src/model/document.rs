//! Typed `.lsx` documents
//!
//! A [`Document`] is one on-disk `.lsx` file: a single region holding a single
//! root node whose `<children>` are typed [`Node`]s.

use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use super::children::Children;
use super::node::Node;
use super::schema::Schema;
use crate::error::{Error, Result};
use crate::formats::lsx::{self, LsxDocument, LsxNode, LsxRegion, LsxVersion};

/// The wrapper shape of a document kind.
#[derive(Debug)]
pub struct DocumentSchema {
    region: String,
    root: String,
    children: Vec<Arc<Schema>>,
}

impl DocumentSchema {
    /// Declare a document kind: `<region id=region><node id=root><children>`
    /// holding nodes of the given kinds.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        root: impl Into<String>,
        children: &[Arc<Schema>],
    ) -> Arc<Self> {
        Arc::new(DocumentSchema {
            region: region.into(),
            root: root.into(),
            children: children.to_vec(),
        })
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn children(&self) -> &[Arc<Schema>] {
        &self.children
    }

    fn child_schema(&self, id: &str) -> Option<&Arc<Schema>> {
        self.children.iter().find(|c| c.id() == id)
    }
}

/// One `.lsx` file's worth of typed nodes.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<DocumentSchema>,
    /// Written to the `<version>` element.
    pub version: LsxVersion,
    children: Children,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.schema.region == other.schema.region
            && self.schema.root == other.schema.root
            && self.children == other.children
    }
}

impl Document {
    /// An empty document.
    #[must_use]
    pub fn new(schema: &Arc<DocumentSchema>) -> Self {
        Document {
            schema: Arc::clone(schema),
            version: LsxVersion::default(),
            children: Children::new(schema.root.clone(), &schema.children),
        }
    }

    /// A document holding `nodes`, all of which must be of allowed kinds.
    pub fn with_nodes(schema: &Arc<DocumentSchema>, nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut doc = Self::new(schema);
        doc.children.extend(nodes)?;
        Ok(doc)
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<DocumentSchema> {
        &self.schema
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Append one root-level node.
    pub fn add(&mut self, node: Node) -> Result<()> {
        self.children.push(node)
    }

    /// Bind a raw `.lsx` tree to this document kind.
    ///
    /// # Errors
    /// Fails on the first wrapper mismatch, a second region or root node, a
    /// root node without `<children>`, or any child that does not load
    /// against its schema.
    pub fn from_lsx(schema: &Arc<DocumentSchema>, raw: &LsxDocument) -> Result<Self> {
        let region = match raw.regions.as_slice() {
            [] => {
                return Err(Error::MissingElement {
                    element: "region",
                    context: "save".to_string(),
                });
            }
            [region] => region,
            [_, extra, ..] => {
                return Err(Error::UnexpectedElement {
                    element: "region",
                    context: format!("save (second region '{}')", extra.id),
                });
            }
        };
        if region.id != schema.region {
            return Err(Error::WrapperMismatch {
                what: "region",
                expected: schema.region.clone(),
                found: region.id.clone(),
            });
        }

        let root = match region.nodes.as_slice() {
            [] => {
                return Err(Error::MissingElement {
                    element: "node",
                    context: format!("region '{}'", region.id),
                });
            }
            [root] => root,
            [_, extra, ..] => {
                return Err(Error::UnexpectedElement {
                    element: "node",
                    context: format!("region '{}' (second root node '{}')", region.id, extra.id),
                });
            }
        };
        if root.id != schema.root {
            return Err(Error::WrapperMismatch {
                what: "root node",
                expected: schema.root.clone(),
                found: root.id.clone(),
            });
        }
        if !root.has_children_element {
            return Err(Error::MissingElement {
                element: "children",
                context: format!("root node '{}'", root.id),
            });
        }

        let mut doc = Self::new(schema);
        doc.version = raw.version;
        for raw_child in &root.children {
            let child_schema =
                schema
                    .child_schema(&raw_child.id)
                    .ok_or_else(|| Error::UnknownChildKind {
                        parent: schema.root.clone(),
                        id: raw_child.id.clone(),
                    })?;
            doc.children.push(Node::from_lsx(child_schema, raw_child)?)?;
        }
        Ok(doc)
    }

    /// Parse document XML text.
    pub fn parse(schema: &Arc<DocumentSchema>, xml: &str) -> Result<Self> {
        Self::from_lsx(schema, &lsx::parse_lsx(xml)?)
    }

    /// Load a document from disk.
    pub fn load<P: AsRef<Path>>(schema: &Arc<DocumentSchema>, path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading {} from {}", schema.region, path.display());
        let doc = Self::from_lsx(schema, &lsx::read_lsx(path)?)?;
        tracing::debug!("Loaded {} nodes", doc.children.len());
        Ok(doc)
    }

    /// Load several files in order and merge each into the first by `key`.
    ///
    /// Later files win on key collisions, so pass the base file before its
    /// overrides.
    pub fn load_merged<P, I, K, F>(schema: &Arc<DocumentSchema>, paths: I, mut key: F) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
        K: Hash + Eq,
        F: FnMut(&Node) -> K,
    {
        let mut merged = Self::new(schema);
        for path in paths {
            let doc = Self::load(schema, path)?;
            merged.merge(doc, &mut key)?;
        }
        Ok(merged)
    }

    /// Upsert `other`'s nodes into this document by `key`.
    pub fn merge<K, F>(&mut self, other: Document, key: F) -> Result<()>
    where
        K: Hash + Eq,
        F: FnMut(&Node) -> K,
    {
        self.children.update(other.children, key)
    }

    /// Encode as a raw `.lsx` tree.
    #[must_use]
    pub fn to_lsx(&self) -> LsxDocument {
        let mut root = LsxNode::new(self.schema.root.clone());
        root.has_children_element = true;
        root.children = self.children.iter().map(Node::to_lsx).collect();

        LsxDocument {
            version: self.version,
            regions: vec![LsxRegion {
                id: self.schema.region.clone(),
                nodes: vec![root],
            }],
        }
    }

    /// Serialize to XML text.
    pub fn to_xml(&self) -> Result<String> {
        lsx::serialize_lsx(&self.to_lsx())
    }

    /// Write to disk, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        tracing::info!("Writing {} ({} nodes) to {}", self.schema.region, self.children.len(), path.display());
        lsx::write_lsx(&self.to_lsx(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::DataType;
    use crate::model::children::by_key;
    use pretty_assertions::assert_eq;

    fn spell_lists() -> (Arc<DocumentSchema>, Arc<Schema>) {
        let list = Schema::builder("SpellList")
            .key("UUID", DataType::Guid)
            .attribute("Comment", DataType::LSString)
            .attribute("Spells", DataType::StringList)
            .build();
        (DocumentSchema::new("SpellLists", "root", &[Arc::clone(&list)]), list)
    }

    fn spell_list(schema: &Arc<Schema>, uuid: &str, spells: &[&str]) -> Node {
        Node::builder(schema)
            .attr("UUID", uuid)
            .attr("Spells", spells.to_vec())
            .build()
            .unwrap()
    }

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<save>
    <version major="4" minor="0" revision="9" build="328" />
    <region id="SpellLists">
        <node id="root">
            <children>
                <node id="SpellList">
                    <attribute id="Comment" type="LSString" value="Wizard cantrips" />
                    <attribute id="Spells" type="LSString" value="Shout_A;Target_B" />
                    <attribute id="UUID" type="guid" value="11111111-1111-4111-8111-111111111111" />
                </node>
            </children>
        </node>
    </region>
</save>
"#;

    #[test]
    fn test_parse_and_reserialize() {
        let (schema, _) = spell_lists();
        let doc = Document::parse(&schema, XML).unwrap();
        assert_eq!(doc.children().len(), 1);
        assert_eq!(doc.version.build, 328);

        let node = doc.children().get(0).unwrap();
        assert_eq!(node.list_value("Spells").unwrap(), ["Shout_A", "Target_B"]);

        let again = Document::parse(&schema, &doc.to_xml().unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_wrong_region_fails() {
        let (schema, _) = spell_lists();
        let xml = XML.replace("region id=\"SpellLists\"", "region id=\"Progressions\"");
        let err = Document::parse(&schema, &xml).unwrap_err();
        assert!(matches!(err, Error::WrapperMismatch { what: "region", .. }));
    }

    #[test]
    fn test_wrong_root_fails() {
        let (schema, _) = spell_lists();
        let xml = XML.replace("node id=\"root\"", "node id=\"base\"");
        let err = Document::parse(&schema, &xml).unwrap_err();
        assert!(matches!(err, Error::WrapperMismatch { what: "root node", .. }));
    }

    #[test]
    fn test_second_root_node_fails() {
        let (schema, _) = spell_lists();
        let second_root = r#"        <node id="root">
            <children>
                <node id="SpellList">
                    <attribute id="UUID" type="guid" value="22222222-2222-4222-8222-222222222222" />
                </node>
            </children>
        </node>
    </region>"#;
        let xml = XML.replacen("    </region>", second_root, 1);
        let err = Document::parse(&schema, &xml).unwrap_err();
        assert!(matches!(err, Error::UnexpectedElement { element: "node", .. }));
    }

    #[test]
    fn test_second_region_fails() {
        let (schema, _) = spell_lists();
        let xml = XML.replace(
            "</save>",
            "    <region id=\"Other\">\n        <node id=\"root\" />\n    </region>\n</save>",
        );
        let err = Document::parse(&schema, &xml).unwrap_err();
        assert!(matches!(err, Error::UnexpectedElement { element: "region", .. }));
    }

    #[test]
    fn test_missing_children_element_fails() {
        let (schema, _) = spell_lists();
        let xml = r#"<save><version major="4" minor="0" revision="9" build="331" />
<region id="SpellLists"><node id="root" /></region></save>"#;
        let err = Document::parse(&schema, xml).unwrap_err();
        assert!(matches!(err, Error::MissingElement { element: "children", .. }));
    }

    #[test]
    fn test_unknown_child_fails() {
        let (schema, _) = spell_lists();
        let xml = XML.replace("node id=\"SpellList\"", "node id=\"Progression\"");
        let err = Document::parse(&schema, &xml).unwrap_err();
        assert!(matches!(err, Error::UnknownChildKind { .. }));
    }

    #[test]
    fn test_empty_document_roundtrip() {
        let (schema, _) = spell_lists();
        let doc = Document::new(&schema);
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<children />"));
        assert_eq!(Document::parse(&schema, &xml).unwrap(), doc);
    }

    #[test]
    fn test_with_nodes_rejects_foreign_kind() {
        let (schema, _) = spell_lists();
        let other = Schema::builder("Progression").build();
        let result = Document::with_nodes(&schema, [Node::builder(&other).build().unwrap()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_overrides_by_uuid() {
        let (schema, list) = spell_lists();
        let a = "11111111-1111-4111-8111-111111111111";
        let b = "22222222-2222-4222-8222-222222222222";

        let mut base = Document::with_nodes(&schema, [spell_list(&list, a, &["X"]), spell_list(&list, b, &["Y"])]).unwrap();
        let dev = Document::with_nodes(&schema, [spell_list(&list, a, &["X", "Z"])]).unwrap();
        base.merge(dev, by_key).unwrap();

        assert_eq!(base.children().len(), 2);
        assert_eq!(base.children().get(0).unwrap().list_value("Spells").unwrap(), ["X", "Z"]);
    }

    #[test]
    fn test_save_and_load_merged() {
        let (schema, list) = spell_lists();
        let dir = tempfile::tempdir().unwrap();
        let a = "11111111-1111-4111-8111-111111111111";
        let c = "33333333-3333-4333-8333-333333333333";

        let base_path = dir.path().join("Lists/SpellLists.lsx");
        let dev_path = dir.path().join("Lists/SpellLists.dev.lsx");
        Document::with_nodes(&schema, [spell_list(&list, a, &["Old"])])
            .unwrap()
            .save(&base_path)
            .unwrap();
        Document::with_nodes(&schema, [spell_list(&list, a, &["New"]), spell_list(&list, c, &["C"])])
            .unwrap()
            .save(&dev_path)
            .unwrap();

        let merged = Document::load_merged(&schema, [&base_path, &dev_path], by_key).unwrap();
        let spells: Vec<_> = merged
            .children()
            .iter()
            .map(|n| n.list_value("Spells").unwrap().join(";"))
            .collect();
        assert_eq!(spells, ["New", "C"]);
    }
}
