//! `Modifiers.txt` parsing

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::formats::stats::{numbered_lines, split_directive};

/// Per record kind, the legal member names and the valuelist governing each.
#[derive(Debug, Clone, Default)]
pub struct Modifiers {
    kinds: IndexMap<String, IndexMap<String, String>>,
}

impl Modifiers {
    /// Parse `modifier type "Kind"` headers followed by
    /// `modifier "Member","ValueList"` lines.
    ///
    /// # Errors
    /// Any other non-blank line, or a member line before the first header,
    /// is a parse error.
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut kinds: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for (line_no, line) in numbered_lines(text) {
            if line.is_empty() {
                continue;
            }
            let parse_error = || Error::Parse {
                file: source.to_string(),
                line: line_no,
                text: line.to_string(),
            };

            match split_directive(line).ok_or_else(parse_error)? {
                ("modifier type", fields) if fields.len() == 1 => {
                    let kind = fields[0].to_string();
                    kinds.entry(kind.clone()).or_default();
                    current = Some(kind);
                }
                ("modifier", fields) if fields.len() == 2 => {
                    let kind = current.as_ref().ok_or_else(parse_error)?;
                    kinds
                        .entry(kind.clone())
                        .or_default()
                        .insert(fields[0].to_string(), fields[1].to_string());
                }
                _ => return Err(parse_error()),
            }
        }

        tracing::debug!("Parsed {} modifier types from {}", kinds.len(), source);
        Ok(Modifiers { kinds })
    }

    /// Load and parse a `Modifiers.txt` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Member table of a kind: member name to valuelist name.
    #[must_use]
    pub fn members(&self, kind: &str) -> Option<&IndexMap<String, String>> {
        self.kinds.get(kind)
    }

    /// The valuelist governing `member` on `kind`.
    #[must_use]
    pub fn valuelist(&self, kind: &str, member: &str) -> Option<&str> {
        self.members(kind)?.get(member).map(String::as_str)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}
