//! SPDX-FileCopyrightText: 2025 `CyberDeco`, 2015 Norbyte (`LSLib`, MIT)
//!
//! SPDX-License-Identifier: MIT
//!
//! Localization XML writing

use super::LocaResource;
use crate::error::Result;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Escape only the characters required in XML text content (not attributes).
/// In text content, only < and & need escaping.
fn escape_text_minimal(s: &str) -> Cow<'_, str> {
    if s.contains('&') || s.contains('<') {
        Cow::Owned(s.replace('&', "&amp;").replace('<', "&lt;"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Write a resource as `.loca.xml`, creating parent directories.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_loca_xml<P: AsRef<Path>>(resource: &LocaResource, path: P) -> Result<()> {
    let path = path.as_ref();
    let xml = serialize_loca_xml(resource)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, xml)?;
    Ok(())
}

/// Convert `LocaResource` to XML string
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_loca_xml(resource: &LocaResource) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("contentList")))?;

    for entry in &resource.entries {
        let mut content = BytesStart::new("content");
        content.push_attribute(("contentuid", entry.key.as_str()));
        content.push_attribute(("version", entry.version.to_string().as_str()));

        if entry.text.is_empty() {
            writer.write_event(Event::Empty(content))?;
        } else {
            writer.write_event(Event::Start(content.borrow()))?;
            let escaped = escape_text_minimal(&entry.text);
            writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("contentList")))?;

    let mut xml = String::from_utf8(output)?;
    xml.push('\n');
    Ok(xml)
}
