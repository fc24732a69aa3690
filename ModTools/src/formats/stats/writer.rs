//! Stats text writing

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::data_line;
use crate::error::Result;
use crate::gamedata::entity::{Entity, is_private};

/// Members written right after `type`, in this order, before `using`.
const LEADING_MEMBERS: [&str; 2] = ["SpellType", "StatusType"];

/// Serialize one entity.
///
/// Output order is fixed: `new entry`, `type`, the spell/status type,
/// `using`, then the remaining members sorted by name. Private members are
/// skipped.
#[must_use]
pub fn serialize_entity(entity: &Entity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "new entry \"{}\"", entity.name());
    let _ = writeln!(out, "type \"{}\"", entity.kind());

    for member in LEADING_MEMBERS {
        if let Some(value) = entity.get(member) {
            let _ = writeln!(out, "{}", data_line(member, &value.to_stats_string()));
        }
    }
    if let Some(base) = entity.base() {
        let _ = writeln!(out, "using \"{base}\"");
    }

    let mut members: Vec<_> = entity
        .members()
        .filter(|(name, _)| !is_private(name) && !LEADING_MEMBERS.contains(name))
        .collect();
    members.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in members {
        let _ = writeln!(out, "{}", data_line(name, &value.to_stats_string()));
    }
    out
}

/// Serialize a whole file: the prologue, then each entity separated by a
/// blank line.
#[must_use]
pub fn serialize_stats<'a>(prologue: &str, entities: impl IntoIterator<Item = &'a Entity>) -> String {
    let mut out = String::from(prologue);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for entity in entities {
        out.push('\n');
        out.push_str(&serialize_entity(entity));
    }
    out
}

/// Write a stats file, creating parent directories.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_stats<'a, P: AsRef<Path>>(
    path: P,
    prologue: &str,
    entities: impl IntoIterator<Item = &'a Entity>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialize_stats(prologue, entities))?;
    Ok(())
}
