//! Stats text format
//!
//! The line-oriented `new entry` / `type` / `using` / `data` format the engine
//! reads from `Stats/Generated/Data/*.txt`. `Modifiers.txt` and
//! `ValueLists.txt` share its quoting rules.

mod reader;
mod writer;

pub use reader::{parse_stats, read_stats};
pub use writer::{serialize_entity, serialize_stats, write_stats};

/// A `data "Name" "value"` line, without trailing newline.
#[must_use]
pub fn data_line(name: &str, value: &str) -> String {
    format!("data \"{name}\" \"{value}\"")
}

/// Split a directive line into its keyword and quoted fields.
///
/// `modifier "Rarity","RarityList"` yields `("modifier", ["Rarity", "RarityList"])`.
/// Fields may be separated by whitespace or a comma. Returns `None` when
/// anything other than quoted fields follows the keyword.
pub(crate) fn split_directive(line: &str) -> Option<(&str, Vec<&str>)> {
    let start = line.find('"').unwrap_or(line.len());
    let keyword = line[..start].trim();
    let mut rest = &line[start..];
    let mut fields = Vec::new();

    while !rest.is_empty() {
        let body = rest.strip_prefix('"')?;
        let end = body.find('"')?;
        fields.push(&body[..end]);
        rest = body[end + 1..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
        }
    }
    Some((keyword, fields))
}

/// Lines of a text file with the BOM stripped, numbered from 1.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()))
}
