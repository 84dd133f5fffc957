//! Label recognition on a single line of text.

use promptframe_core::model::BlockNode;
use promptframe_registry::{LineDefinition, Registry};

/// A line that starts with a recognized label followed by a colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine<'r> {
    pub definition: &'r LineDefinition,
    /// Character offset of the label (after leading whitespace).
    pub label_start: usize,
    /// Character offset just past the colon.
    pub label_end: usize,
    /// Text after the colon, leading whitespace trimmed.
    pub remainder: String,
}

impl MatchedLine<'_> {
    /// A label line with nothing after the colon.
    pub fn is_placeholder(&self) -> bool {
        self.remainder.trim().is_empty()
    }
}

/// Recognize a label at the start of `text`.
///
/// Candidates are tried longest label first. `None` just means the line is
/// ordinary text.
pub fn parse_line<'r>(registry: &'r Registry, text: &str) -> Option<MatchedLine<'r>> {
    let leading = text
        .char_indices()
        .find(|&(_, c)| !is_leading_space(c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let trimmed_start = &text[leading..];
    let label_start = text[..leading].chars().count();

    for definition in registry.line_definitions_by_length() {
        let mut prefix: String = definition.label.chars().flat_map(char::to_lowercase).collect();
        prefix.push(':');
        let Some(suffix) = strip_prefix_lowercase(trimmed_start, &prefix) else {
            continue;
        };

        return Some(MatchedLine {
            definition,
            label_start,
            label_end: label_start + definition.label.chars().count() + 1,
            remainder: suffix.trim_start_matches(is_leading_space).to_string(),
        });
    }

    None
}

/// Parse a block's text, but only for text-bearing blocks.
pub fn parse_block<'r>(registry: &'r Registry, node: &BlockNode) -> Option<MatchedLine<'r>> {
    let line = node.as_text_line()?;
    parse_line(registry, &line.text())
}

/// Whitespace as editors paste it, including a stray byte order mark.
fn is_leading_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Case-insensitive `strip_prefix` where `prefix` was lowercased char by char.
///
/// Both sides use `char::to_lowercase`, so context-dependent mappings such as
/// a final sigma fold the same way. The returned slice always starts on a
/// char boundary of the original string.
fn strip_prefix_lowercase<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let mut lowered = String::with_capacity(prefix.len());

    for (i, c) in text.char_indices() {
        lowered.extend(c.to_lowercase());
        if !prefix.starts_with(lowered.as_str()) {
            return None;
        }
        if lowered.len() == prefix.len() {
            return Some(&text[i + c.len_utf8()..]);
        }
    }

    None
}
