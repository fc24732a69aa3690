//! LSX file writing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`, 2015 Norbyte (`LSLib`, MIT)
//!
//! SPDX-License-Identifier: MIT

use super::document::{LsxDocument, LsxNode};
use crate::error::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::fs;
use std::path::Path;

/// Write an LSX document to disk, creating parent directories.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_lsx<P: AsRef<Path>>(doc: &LsxDocument, path: P) -> Result<()> {
    let path = path.as_ref();
    let xml = serialize_lsx(doc)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize LSX document to XML string
///
/// Output is UTF-8 with an XML declaration and 4-space indentation. Nodes
/// without attributes or children are written self-closing.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_lsx(doc: &LsxDocument) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    // <save>
    writer.write_event(Event::Start(BytesStart::new("save")))?;

    // <version>
    let mut version = BytesStart::new("version");
    version.push_attribute(("major", doc.version.major.to_string().as_str()));
    version.push_attribute(("minor", doc.version.minor.to_string().as_str()));
    version.push_attribute(("revision", doc.version.revision.to_string().as_str()));
    version.push_attribute(("build", doc.version.build.to_string().as_str()));
    writer.write_event(Event::Empty(version))?;

    // <region>s
    for region in &doc.regions {
        let mut region_tag = BytesStart::new("region");
        region_tag.push_attribute(("id", region.id.as_str()));
        writer.write_event(Event::Start(region_tag.borrow()))?;

        for node in &region.nodes {
            write_node(&mut writer, node)?;
        }

        writer.write_event(Event::End(BytesEnd::new("region")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("save")))?;

    let mut xml = String::from_utf8(output)?;
    // Match the engine's spacing before self-closing tags
    xml = xml.replace("/>", " />");
    xml.push('\n');
    Ok(xml)
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &LsxNode) -> Result<()> {
    let has_attributes = !node.attributes.is_empty();
    let has_children = !node.children.is_empty() || node.has_children_element;

    let mut node_start = BytesStart::new("node");
    node_start.push_attribute(("id", node.id.as_str()));

    if let Some(ref key) = node.key {
        node_start.push_attribute(("key", key.as_str()));
    }

    if !has_attributes && !has_children {
        writer.write_event(Event::Empty(node_start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(node_start.borrow()))?;

    for attr in &node.attributes {
        let mut attr_tag = BytesStart::new("attribute");
        attr_tag.push_attribute(("id", attr.id.as_str()));
        attr_tag.push_attribute(("type", attr.type_name.as_str()));

        if let Some(ref handle) = attr.handle {
            attr_tag.push_attribute(("handle", handle.as_str()));
            if !attr.value.is_empty() {
                attr_tag.push_attribute(("value", attr.value.as_str()));
            }
            if let Some(version) = attr.version {
                attr_tag.push_attribute(("version", version.to_string().as_str()));
            }
        } else {
            attr_tag.push_attribute(("value", attr.value.as_str()));
        }
        writer.write_event(Event::Empty(attr_tag))?;
    }

    if has_children {
        if node.children.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("children")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("children")))?;
            for child in &node.children {
                write_node(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new("children")))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("node")))?;
    Ok(())
}
