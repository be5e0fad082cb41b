//! Assembly of the consolidated doc-block stream.
//!
//! For every doc-block of a file the [`Aggregator`] writes a file-boundary
//! comment followed by the normalized block text. Example references are
//! replaced by their rendered transcript; everything between an example
//! marker and its end marker is dropped.
//!
//! ## Output Shape
//!
//! ```text
//!
//! <!-- filename: lib/foo.cpp -->
//! @startDocuBlock foo
//!
//! hello
//! @endDocuBlock
//!
//! ```
//!
//! Block marker lines are always echoed, followed by an empty line, even inside
//! an example region.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::catalog::seed_output;
use crate::config::Config;
use crate::discovery::{FileFilter, collect_files};
use crate::error::snippet;
use crate::example::{ExampleKind, render_example};
use crate::line::{Line, classify};
use crate::report::{MissingTranscript, RunReport};
use crate::scanner::{DocBlock, DraftPolicy, read_source, scan_lines};
use crate::transcript::TranscriptStore;
use crate::{Error, Result};

// Tag runs from the first `{` to the last `}`.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*)\}").expect("example tag regex is valid"));

/// Tag referenced by an example marker line.
pub fn example_tag(text: &str) -> Option<&str> {
    TAG_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|tag| !tag.is_empty())
}

/// Drives scanning and example rendering for individual files.
#[derive(Debug, Clone)]
pub struct Aggregator {
    store: TranscriptStore,
    policy: DraftPolicy,
}

impl Aggregator {
    /// Aggregator resolving transcripts in `store` and tolerating
    /// unterminated blocks under `policy`.
    pub const fn new(store: TranscriptStore, policy: DraftPolicy) -> Self {
        Self { store, policy }
    }

    /// Aggregator for a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.transcript_store(), config.draft_policy())
    }

    /// Whether `path` is scanned with draft tolerance.
    pub fn is_draft(&self, path: &Path) -> bool {
        self.policy.is_draft(path)
    }

    /// Read `path` and append its doc-blocks to `out`.
    pub fn process_file<W: Write>(&self, out: &mut W, path: &Path) -> Result<RunReport> {
        let text = read_source(path)?;
        self.process_text(out, path, &text)
    }

    /// Append the doc-blocks found in `text` (the contents of `path`) to `out`.
    pub fn process_text<W: Write>(&self, out: &mut W, path: &Path, text: &str) -> Result<RunReport> {
        let lines: Vec<&str> = text.lines().collect();
        let draft = self.is_draft(path);
        let blocks = scan_lines(path, &lines, draft)?;
        debug!(path = %path.display(), draft, blocks = blocks.len(), "scanned file");

        let mut report = RunReport {
            files_scanned: 1,
            ..RunReport::default()
        };
        for block in &blocks {
            self.write_block(out, block, &lines, &mut report)?;
            report.blocks += 1;
        }
        Ok(report)
    }

    fn write_block<W: Write>(
        &self,
        out: &mut W,
        block: &DocBlock,
        lines: &[&str],
        report: &mut RunReport,
    ) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "<!-- filename: {} -->", block.path.display())?;

        let mut suppressed: Option<ExampleKind> = None;
        for raw in block.slice(lines) {
            match (classify(raw), suppressed) {
                (Line::StartBlock(text) | Line::EndBlock(text), _) => {
                    write!(out, "{text}\n\n")?;
                },
                (Line::Blank, _) => writeln!(out)?,
                (Line::Text(text) | Line::EndExample { text, .. }, None) => {
                    writeln!(out, "{text}")?;
                },
                (Line::BeginExample { kind, text }, None) => {
                    self.write_example(out, &block.path, kind, &text, report)?;
                    suppressed = Some(kind);
                },
                (Line::EndExample { kind, .. }, Some(open)) if kind == open => {
                    suppressed = None;
                },
                _ => {},
            }
        }

        if let Some(kind) = suppressed {
            warn!(
                path = %block.path.display(),
                block = %block.name,
                "doc-block ended before {}",
                kind.end_marker()
            );
        }
        Ok(())
    }

    fn write_example<W: Write>(
        &self,
        out: &mut W,
        path: &Path,
        kind: ExampleKind,
        text: &str,
        report: &mut RunReport,
    ) -> Result<()> {
        let tag = example_tag(text).ok_or_else(|| Error::MalformedExample {
            path: path.to_path_buf(),
            snippet: snippet(text),
        })?;

        if let Some(transcript) = self.store.resolve(tag) {
            render_example(out, &transcript, tag, kind, path)?;
            report.examples_rendered += 1;
        } else {
            let expected_at = self.store.path_for(tag);
            warn!(
                tag,
                path = %path.display(),
                "could not find the generated example for {tag}"
            );
            report.record_missing(MissingTranscript {
                tag: tag.to_string(),
                kind,
                referenced_from: path.to_path_buf(),
                expected_at,
            });
        }
        Ok(())
    }
}

/// Run a full extraction: seed the output with the catalog, then append every
/// doc-block found below the configured roots.
///
/// Fatal problems abort immediately; whatever was written so far stays in the
/// output file.
pub fn run(config: &Config) -> Result<RunReport> {
    seed_output(&config.output, config.catalog.as_deref(), &config.catalog_block)?;

    let file = OpenOptions::new().append(true).open(&config.output)?;
    let mut out = BufWriter::new(file);
    let report = walk_roots(config, &mut out)?;
    out.flush()?;

    info!(
        output = %config.output.display(),
        files = report.files_scanned,
        blocks = report.blocks,
        examples = report.examples_rendered,
        missing = report.missing.len(),
        "extraction finished"
    );
    Ok(report)
}

/// Scan every file and resolve every example without writing any output.
pub fn check(config: &Config) -> Result<RunReport> {
    walk_roots(config, &mut io::sink())
}

fn walk_roots<W: Write>(config: &Config, out: &mut W) -> Result<RunReport> {
    let aggregator = Aggregator::from_config(config);
    let filter = FileFilter::new(config.extensions.clone(), config.skip_marker.clone());
    debug!(
        transcripts = %aggregator.store.dir().display(),
        lenient = ?aggregator.policy.prefixes(),
        "resolved run settings"
    );

    let mut report = RunReport::default();
    for root in &config.roots {
        info!(root = %root.path.display(), draft = root.draft, "searching for doc-blocks");
        for path in collect_files(&root.path, &filter)? {
            report.merge(aggregator.process_file(out, &path)?);
            out.flush()?;
        }
    }
    Ok(report)
}
