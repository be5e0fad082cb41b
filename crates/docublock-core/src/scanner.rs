//! Doc-block region scanning.
//!
//! A doc-block runs from a line containing `@startDocuBlock <name>` to the next
//! line containing `@endDocuBlock`, both marker lines included. Blocks do not
//! nest: the scanner keeps a single open-block slot.
//!
//! Draft sources (unprocessed book pages) routinely contain start markers that
//! are never closed. For files under a draft path:
//!
//! - a start marker while a block is open leaves the open block pending, the
//!   second marker line becoming part of its content
//! - a block still open at end of file runs to the last line
//!
//! Outside draft paths both situations are fatal. An end marker without an
//! open block is fatal everywhere.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::snippet;
use crate::line::{block_name, is_end_marker};
use crate::{Error, Result};

/// A named range of lines in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    /// Text following the start marker.
    pub name: String,
    /// Zero-based index of the start marker line.
    pub start_line: usize,
    /// Zero-based index one past the end marker line (or end of file).
    pub end_line: usize,
    /// File the block was found in.
    pub path: PathBuf,
}

impl DocBlock {
    /// Lines belonging to this block.
    pub fn slice<'a, 'b>(&self, lines: &'a [&'b str]) -> &'a [&'b str] {
        let end = self.end_line.min(lines.len());
        &lines[self.start_line.min(end)..end]
    }
}

/// Path prefixes under which unterminated doc-blocks are tolerated.
#[derive(Debug, Clone, Default)]
pub struct DraftPolicy {
    prefixes: Vec<PathBuf>,
}

impl DraftPolicy {
    /// Build a policy from a set of lenient path prefixes.
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one lenient prefix.
    pub fn add(&mut self, prefix: impl Into<PathBuf>) {
        self.prefixes.push(prefix.into());
    }

    /// Whether `path` lies under one of the lenient prefixes.
    pub fn is_draft(&self, path: &Path) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Configured prefixes.
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }
}

#[derive(Debug)]
struct OpenBlock {
    name: String,
    start: usize,
}

/// Collect the doc-blocks contained in `lines`.
///
/// `path` is only used for diagnostics and to tag the resulting blocks.
pub fn scan_lines(path: &Path, lines: &[&str], draft: bool) -> Result<Vec<DocBlock>> {
    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(name) = block_name(line) {
            if let Some(pending) = &open {
                if !draft {
                    return Err(Error::NestedBlock {
                        path: path.to_path_buf(),
                        line: index + 1,
                        snippet: snippet(line),
                    });
                }
                debug!(
                    path = %path.display(),
                    line = index + 1,
                    pending = %pending.name,
                    "start marker inside open draft block, keeping it pending"
                );
            } else {
                open = Some(OpenBlock {
                    name: name.to_string(),
                    start: index,
                });
            }
        }

        if is_end_marker(line) {
            let Some(block) = open.take() else {
                return Err(Error::UnmatchedEnd {
                    path: path.to_path_buf(),
                    line: index + 1,
                    snippet: snippet(line),
                });
            };
            blocks.push(DocBlock {
                name: block.name,
                start_line: block.start,
                end_line: index + 1,
                path: path.to_path_buf(),
            });
        }
    }

    if let Some(block) = open {
        if !draft {
            return Err(Error::UnterminatedBlock {
                path: path.to_path_buf(),
                line: block.start + 1,
                snippet: snippet(lines[block.start]),
            });
        }
        debug!(
            path = %path.display(),
            name = %block.name,
            "unterminated draft block runs to end of file"
        );
        blocks.push(DocBlock {
            name: block.name,
            start_line: block.start,
            end_line: lines.len(),
            path: path.to_path_buf(),
        });
    }

    Ok(blocks)
}

/// Collect the doc-blocks contained in `text`.
pub fn scan_text(path: &Path, text: &str, draft: bool) -> Result<Vec<DocBlock>> {
    let lines: Vec<&str> = text.lines().collect();
    scan_lines(path, &lines, draft)
}

/// Read `path` and collect its doc-blocks.
pub fn scan_file(path: &Path, draft: bool) -> Result<Vec<DocBlock>> {
    let text = read_source(path)?;
    scan_text(path, &text, draft)
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scan(text: &str, draft: bool) -> Result<Vec<DocBlock>> {
        scan_text(Path::new("lib/foo.cpp"), text, draft)
    }

    #[test]
    fn test_single_block_spans_markers() {
        let blocks = scan("/// @startDocuBlock foo\n/// hello\n/// @endDocuBlock\n", false).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "foo");
        assert_eq!((blocks[0].start_line, blocks[0].end_line), (0, 3));
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let text = "code\n/// @startDocuBlock a\n/// x\n/// @endDocuBlock\nmore code\n\
                    /// @startDocuBlock b\n/// @endDocuBlock\n";
        let blocks = scan(text, false).unwrap();

        let ranges: Vec<_> = blocks.iter().map(|b| (b.name.as_str(), b.start_line, b.end_line)).collect();
        assert_eq!(ranges, vec![("a", 1, 4), ("b", 5, 7)]);
    }

    #[test]
    fn test_unterminated_block_is_fatal_outside_drafts() {
        let err = scan("/// @startDocuBlock foo\n/// hello\n", false).unwrap_err();
        assert!(matches!(err, Error::UnterminatedBlock { line: 1, .. }));
        assert!(err.to_string().contains("lib/foo.cpp"));
    }

    #[test]
    fn test_unterminated_draft_block_runs_to_eof() {
        let blocks = scan("intro\n@startDocuBlock foo\nhello\nworld\n", true).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!((blocks[0].start_line, blocks[0].end_line), (1, 4));
    }

    #[test]
    fn test_end_without_start_is_always_fatal() {
        for draft in [false, true] {
            let err = scan("text\n/// @endDocuBlock\n", draft).unwrap_err();
            assert!(matches!(err, Error::UnmatchedEnd { line: 2, .. }));
        }
    }

    #[test]
    fn test_nested_start_is_fatal_outside_drafts() {
        let text = "@startDocuBlock a\n@startDocuBlock b\n@endDocuBlock\n";
        let err = scan(text, false).unwrap_err();
        assert!(matches!(err, Error::NestedBlock { line: 2, .. }));
    }

    #[test]
    fn test_nested_start_keeps_first_block_pending_in_drafts() {
        let text = "@startDocuBlock a\n@startDocuBlock b\n@endDocuBlock\n";
        let blocks = scan(text, true).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "a");
        assert_eq!((blocks[0].start_line, blocks[0].end_line), (0, 3));
    }

    #[test]
    fn test_slice_returns_block_lines() {
        let lines = ["x", "@startDocuBlock a", "y", "@endDocuBlock", "z"];
        let blocks = scan_lines(Path::new("a.md"), &lines, false).unwrap();
        assert_eq!(blocks[0].slice(&lines), &["@startDocuBlock a", "y", "@endDocuBlock"]);
    }

    #[test]
    fn test_draft_policy_matches_prefixes() {
        let policy = DraftPolicy::new(["Documentation/Books/Manual", "Documentation/Books/AQL"]);

        assert!(policy.is_draft(Path::new("Documentation/Books/Manual/index.md")));
        assert!(policy.is_draft(Path::new("Documentation/Books/AQL")));
        assert!(!policy.is_draft(Path::new("Documentation/Books/ManualExtra/x.md")));
        assert!(!policy.is_draft(Path::new("Documentation/DocuBlocks/x.md")));
        assert!(!DraftPolicy::default().is_draft(Path::new("anything")));
    }

    fn line_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("@startDocuBlock blk"),
            Just("@endDocuBlock"),
            Just("/// text"),
            Just(""),
        ]
    }

    proptest! {
        #[test]
        fn prop_blocks_are_ordered_and_disjoint(
            lines in prop::collection::vec(line_strategy(), 0..40),
            draft in any::<bool>(),
        ) {
            if let Ok(blocks) = scan_lines(Path::new("p.md"), &lines, draft) {
                for block in &blocks {
                    prop_assert!(block.start_line < block.end_line);
                    prop_assert!(block.end_line <= lines.len());
                }
                for pair in blocks.windows(2) {
                    prop_assert!(pair[0].end_line <= pair[1].start_line);
                }
            }
        }
    }
}
