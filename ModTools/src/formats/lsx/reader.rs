//! SPDX-FileCopyrightText: 2025 CyberDeco, 2015 Norbyte (LSLib, MIT)
//!
//! SPDX-License-Identifier: MIT
//!
//! LSX file reading

use super::document::{LsxAttribute, LsxDocument, LsxNode, LsxRegion, LsxVersion};
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

/// Read an LSX file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid XML.
pub fn read_lsx<P: AsRef<Path>>(path: P) -> Result<LsxDocument> {
    let content = fs::read_to_string(path)?;
    parse_lsx(&content)
}

/// Parse LSX from XML string
///
/// Attribute values are unescaped. Mismatched closing tags are reported by
/// quick-xml as errors rather than repaired.
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_lsx(content: &str) -> Result<LsxDocument> {
    // Tolerate the UTF-8 BOM LSLib writes.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut doc = LsxDocument {
        version: LsxVersion::default(),
        regions: Vec::new(),
    };

    let mut buf = Vec::new();
    let mut current_region: Option<LsxRegion> = None;
    let mut node_stack: Vec<LsxNode> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"version" => read_version(&e, &mut doc.version)?,
                b"region" => {
                    current_region = Some(LsxRegion {
                        id: id_of(&e)?,
                        nodes: Vec::new(),
                    });
                }
                b"node" => node_stack.push(read_node_start(&e)?),
                b"attribute" => {
                    let attribute = read_attribute(&e)?;
                    if let Some(node) = node_stack.last_mut() {
                        node.attributes.push(attribute);
                    }
                }
                b"children" => {
                    if let Some(node) = node_stack.last_mut() {
                        node.has_children_element = true;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"version" => read_version(&e, &mut doc.version)?,
                b"attribute" => {
                    let attribute = read_attribute(&e)?;
                    if let Some(node) = node_stack.last_mut() {
                        node.attributes.push(attribute);
                    }
                }
                b"children" => {
                    if let Some(node) = node_stack.last_mut() {
                        node.has_children_element = true;
                    }
                }
                b"node" => {
                    // Self-closing node with no attributes/children
                    let empty_node = read_node_start(&e)?;
                    attach(empty_node, &mut node_stack, current_region.as_mut())?;
                }
                b"region" => {
                    doc.regions.push(LsxRegion {
                        id: id_of(&e)?,
                        nodes: Vec::new(),
                    });
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"node" => {
                    if let Some(completed_node) = node_stack.pop() {
                        attach(completed_node, &mut node_stack, current_region.as_mut())?;
                    }
                }
                b"region" => {
                    if let Some(region) = current_region.take() {
                        doc.regions.push(region);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

/// Nodes belong to the enclosing node, else to the open region.
fn attach(node: LsxNode, stack: &mut [LsxNode], region: Option<&mut LsxRegion>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let Some(region) = region {
        region.nodes.push(node);
    } else {
        return Err(Error::UnexpectedElement {
            element: "node",
            context: format!("save (node '{}' outside any region)", node.id),
        });
    }
    Ok(())
}

fn unescaped(attr: &Attribute<'_>) -> Result<String> {
    Ok(attr.unescape_value()?.into_owned())
}

fn id_of(e: &BytesStart<'_>) -> Result<String> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"id" {
            return unescaped(&attr);
        }
    }
    Ok(String::new())
}

fn read_version(e: &BytesStart<'_>, version: &mut LsxVersion) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        let value = unescaped(&attr)?;
        match attr.key.as_ref() {
            b"major" => version.major = value.parse().unwrap_or(4),
            b"minor" => version.minor = value.parse().unwrap_or(0),
            b"revision" => version.revision = value.parse().unwrap_or(0),
            b"build" => version.build = value.parse().unwrap_or(0),
            _ => {}
        }
    }
    Ok(())
}

fn read_node_start(e: &BytesStart<'_>) -> Result<LsxNode> {
    let mut node = LsxNode::new(String::new());
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => node.id = unescaped(&attr)?,
            b"key" => node.key = Some(unescaped(&attr)?),
            _ => {}
        }
    }
    Ok(node)
}

fn read_attribute(e: &BytesStart<'_>) -> Result<LsxAttribute> {
    let mut attribute = LsxAttribute::new(String::new(), String::new(), String::new());
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => attribute.id = unescaped(&attr)?,
            b"type" => attribute.type_name = unescaped(&attr)?,
            b"value" => attribute.value = unescaped(&attr)?,
            b"handle" => attribute.handle = Some(unescaped(&attr)?),
            b"version" => attribute.version = unescaped(&attr)?.parse().ok(),
            _ => {}
        }
    }
    Ok(attribute)
}
