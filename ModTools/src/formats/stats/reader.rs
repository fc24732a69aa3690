//! Stats text reading

use std::fs;
use std::path::Path;

use super::{numbered_lines, split_directive};
use crate::error::{Error, Result};
use crate::gamedata::entity::{Entity, EntityKind, MemberValue};

/// An entry seen but not yet complete: its `type` line may still follow.
struct Pending {
    name: String,
    line: usize,
    kind: Option<EntityKind>,
    using: Option<String>,
    members: Vec<(String, MemberValue)>,
}

impl Pending {
    fn finish(self, source: &str) -> Result<Entity> {
        let kind = self.kind.ok_or_else(|| Error::Parse {
            file: source.to_string(),
            line: self.line,
            text: format!("entry \"{}\" has no type", self.name),
        })?;
        let mut entity = Entity::new(self.name, kind);
        entity.set_base(self.using);
        for (member, value) in self.members {
            entity.set(member, value);
        }
        Ok(entity)
    }
}

/// Values containing `;` are read back as lists.
fn member_value(text: &str) -> MemberValue {
    if text.contains(';') {
        MemberValue::List(
            text.split(';')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    } else {
        MemberValue::Scalar(text.to_string())
    }
}

/// Parse stats text into entities, in file order.
///
/// `source` labels parse errors. Blank lines and `//` comments are skipped.
///
/// # Errors
/// Fails on an unrecognized line, a directive outside an entry, an entry
/// without a `type`, or an unknown kind.
pub fn parse_stats(text: &str, source: &str) -> Result<Vec<Entity>> {
    let mut entities = Vec::new();
    let mut pending: Option<Pending> = None;

    for (line_no, line) in numbered_lines(text) {
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let parse_error = || Error::Parse {
            file: source.to_string(),
            line: line_no,
            text: line.to_string(),
        };

        let (keyword, fields) = split_directive(line).ok_or_else(parse_error)?;
        match (keyword, fields.as_slice()) {
            ("new entry", [name]) => {
                if let Some(done) = pending.take() {
                    entities.push(done.finish(source)?);
                }
                pending = Some(Pending {
                    name: (*name).to_string(),
                    line: line_no,
                    kind: None,
                    using: None,
                    members: Vec::new(),
                });
            }
            ("type", [kind]) => {
                let entry = pending.as_mut().ok_or_else(parse_error)?;
                entry.kind = Some(kind.parse()?);
            }
            ("using", [base]) => {
                let entry = pending.as_mut().ok_or_else(parse_error)?;
                entry.using = Some((*base).to_string());
            }
            ("data", [member, value]) => {
                let entry = pending.as_mut().ok_or_else(parse_error)?;
                entry.members.push(((*member).to_string(), member_value(value)));
            }
            _ => return Err(parse_error()),
        }
    }

    if let Some(done) = pending {
        entities.push(done.finish(source)?);
    }
    Ok(entities)
}

/// Read a stats file from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn read_stats<P: AsRef<Path>>(path: P) -> Result<Vec<Entity>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let entities = parse_stats(&text, &path.display().to_string())?;
    tracing::debug!("Read {} entries from {}", entities.len(), path.display());
    Ok(entities)
}
