//! Run-level outcome accumulated across all scanned files.

use std::path::PathBuf;

use serde::Serialize;

use crate::example::ExampleKind;

/// Example reference whose transcript file does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTranscript {
    /// Tag named by the example marker.
    pub tag: String,
    /// Declared kind of the example.
    pub kind: ExampleKind,
    /// Documentation file holding the reference.
    pub referenced_from: PathBuf,
    /// Where the transcript was expected.
    pub expected_at: PathBuf,
}

/// Counters and content gaps of one extraction run.
///
/// A run is successful when no transcript was missing. Fatal problems never
/// end up here; they abort the run as an [`Error`](crate::Error).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Source files scanned.
    pub files_scanned: usize,
    /// Doc-blocks written (or checked).
    pub blocks: usize,
    /// Example transcripts rendered.
    pub examples_rendered: usize,
    /// References whose transcript was not found.
    pub missing: Vec<MissingTranscript>,
}

impl RunReport {
    /// Whether every referenced transcript was found.
    pub fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    /// Record a reference without a transcript.
    pub fn record_missing(&mut self, missing: MissingTranscript) {
        self.missing.push(missing);
    }

    /// Fold the counters of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        self.files_scanned += other.files_scanned;
        self.blocks += other.blocks;
        self.examples_rendered += other.examples_rendered;
        self.missing.extend(other.missing);
    }
}
