//! Display text normalization

/// Paragraph separator the engine renders as a blank line.
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Normalize authored text for localization.
///
/// Blank lines separate paragraphs, which are joined with [`PARAGRAPH_BREAK`].
/// Within a paragraph, runs of whitespace (including single newlines)
/// collapse to one space. Leading and trailing whitespace is dropped.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.extend(line.split_whitespace());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs.join(PARAGRAPH_BREAK)
}
