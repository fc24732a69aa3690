//! `ValueLists.txt` parsing

use std::fs;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::formats::stats::{numbered_lines, split_directive};

/// Legal literal values per valuelist. An empty set accepts anything.
#[derive(Debug, Clone, Default)]
pub struct ValueLists {
    lists: IndexMap<String, IndexSet<String>>,
}

impl ValueLists {
    /// Parse `valuelist "Name"` headers followed by `value "Literal"` lines.
    ///
    /// # Errors
    /// Any other non-blank line, or a value before the first header, is a
    /// parse error.
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut lists: IndexMap<String, IndexSet<String>> = IndexMap::new();
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
                ("valuelist", fields) if fields.len() == 1 => {
                    let name = fields[0].to_string();
                    lists.entry(name.clone()).or_default();
                    current = Some(name);
                }
                ("value", fields) if fields.len() == 1 => {
                    let name = current.as_ref().ok_or_else(parse_error)?;
                    lists
                        .entry(name.clone())
                        .or_default()
                        .insert(fields[0].to_string());
                }
                _ => return Err(parse_error()),
            }
        }

        tracing::debug!("Parsed {} valuelists from {}", lists.len(), source);
        Ok(ValueLists { lists })
    }

    /// Load and parse a `ValueLists.txt` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// The legal values of a valuelist, or `None` if it was never declared.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&IndexSet<String>> {
        self.lists.get(name)
    }

    /// Whether `value` is legal for the valuelist `name`.
    ///
    /// Undeclared and empty valuelists accept every value.
    #[must_use]
    pub fn accepts(&self, name: &str, value: &str) -> bool {
        match self.lists.get(name) {
            Some(values) if !values.is_empty() => values.contains(value),
            _ => true,
        }
    }
}
