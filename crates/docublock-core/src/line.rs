//! Comment decoration stripping and marker recognition for single lines.
//!
//! Doc-block text lives in `///` comments (or plain lines for markdown
//! sources). [`normalize`] removes the decoration, [`classify`] additionally
//! recognizes the structural markers that drive the scanner and aggregator.

use std::sync::LazyLock;

use regex::Regex;

use crate::example::ExampleKind;

/// Opens a doc-block; the rest of the line is the block name.
pub const START_MARKER: &str = "@startDocuBlock";
/// Closes the currently open doc-block.
pub const END_MARKER: &str = "@endDocuBlock";
/// Replacement for comment lines that carry no text.
pub const LINE_BREAK: &str = "<br />";

// Three or more slashes with nothing but whitespace up to the end of line.
static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//(/)+\s*\n").expect("line break regex is valid"));

// Decorated list item: prefix, at least two blanks, then `-`, `*` or a digit.
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"///+(\s+\s+)([-\*\d])").expect("list item regex is valid"));

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"///\s").expect("comment prefix regex is valid"));

/// A source line after decoration has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Nothing left after normalization.
    Blank,
    /// Plain documentation text.
    Text(String),
    /// `@startDocuBlock <name>`; holds the normalized line.
    StartBlock(String),
    /// `@endDocuBlock`; holds the normalized line.
    EndBlock(String),
    /// Example reference opening a suppressed region.
    BeginExample {
        /// Declared transcript grammar.
        kind: ExampleKind,
        /// Normalized marker line, still carrying the `{tag}`.
        text: String,
    },
    /// Closes the suppressed region opened by a [`Line::BeginExample`].
    EndExample {
        /// Kind named by the end marker.
        kind: ExampleKind,
        /// Normalized marker line.
        text: String,
    },
}

/// Strip comment decoration from one raw line.
///
/// The input is a single line without its terminator. Malformed decoration is
/// passed through untouched.
pub fn normalize(raw: &str) -> String {
    let terminated = format!("{raw}\n");
    let text = BREAK_RE.replace_all(&terminated, "<br />\n");
    let text = LIST_RE.replace_all(&text, "  ${2}");
    let text = PREFIX_RE.replace_all(&text, "");
    text.trim_matches('\n').to_string()
}

/// Normalize a raw line and recognize the marker it carries, if any.
pub fn classify(raw: &str) -> Line {
    let text = normalize(raw);
    if text.is_empty() {
        return Line::Blank;
    }
    if text.contains(START_MARKER) {
        return Line::StartBlock(text);
    }
    if text.contains(END_MARKER) {
        return Line::EndBlock(text);
    }
    if let Some(kind) = ExampleKind::from_end_marker(&text) {
        return Line::EndExample { kind, text };
    }
    if let Some(kind) = ExampleKind::from_begin_marker(&text) {
        return Line::BeginExample { kind, text };
    }
    Line::Text(text)
}

/// Name of the block opened by `line`, or `None` when it is not a start marker.
pub fn block_name(line: &str) -> Option<&str> {
    line.find(START_MARKER)
        .map(|pos| line[pos + START_MARKER.len()..].trim())
}

/// Whether a raw line closes a doc-block.
pub fn is_end_marker(line: &str) -> bool {
    line.contains(END_MARKER)
}
