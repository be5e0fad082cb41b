//! Error types and handling for docublock-core operations.
//!
//! Every error in this module is fatal for a run: it means the documentation
//! source, the transcript store or the configuration is malformed and has to be
//! fixed before the output can be trusted. Content gaps (a referenced transcript
//! that simply does not exist) are not errors; they are recorded in the
//! [`RunReport`](crate::RunReport) instead.
//!
//! ## Error Categories
//!
//! - **Structure**: unpaired or unterminated doc-block markers
//! - **Example**: malformed example references and transcripts that do not match
//!   their declared kind
//! - **I/O**: unreadable sources, transcripts or output files
//! - **Configuration**: invalid `docublock.toml` settings
//!
//! Structural variants carry the offending path and a snippet of the offending
//! line so that the message alone is enough to locate the problem.

use std::path::PathBuf;

use thiserror::Error;

/// Maximum number of characters of an offending line kept in error messages.
const SNIPPET_LEN: usize = 80;

/// The main error type for docublock-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading source files, walking search roots and writing the output
    /// artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being scanned.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A start marker was seen while another doc-block was still open.
    ///
    /// Only raised outside draft paths; draft paths keep the first block pending.
    #[error(
        "next startDocuBlock found without endDocuBlock in between in file {} at line {line} [{snippet}]",
        path.display()
    )]
    NestedBlock {
        /// File being scanned.
        path: PathBuf,
        /// One-based line number of the second start marker.
        line: usize,
        /// Offending line text.
        snippet: String,
    },

    /// An end marker was seen with no open doc-block.
    #[error(
        "endDocuBlock without previous startDocuBlock seen while analyzing file {} at line {line} [{snippet}]",
        path.display()
    )]
    UnmatchedEnd {
        /// File being scanned.
        path: PathBuf,
        /// One-based line number of the end marker.
        line: usize,
        /// Offending line text.
        snippet: String,
    },

    /// The file ended while a doc-block was still open.
    #[error(
        "no endDocuBlock found while analyzing file {} for block opened at line {line} [{snippet}]",
        path.display()
    )]
    UnterminatedBlock {
        /// File being scanned.
        path: PathBuf,
        /// One-based line number of the unclosed start marker.
        line: usize,
        /// Start marker text.
        snippet: String,
    },

    /// An example marker did not carry a `{tag}` reference.
    #[error("failed to match file name in '{snippet}' while parsing {}", path.display())]
    MalformedExample {
        /// File containing the marker.
        path: PathBuf,
        /// Marker line text.
        snippet: String,
    },

    /// A transcript does not start the way its declared kind requires.
    #[error(
        "mismatching blocktype - expecting '{kind}' to start with '{expected}' in {} while inspecting {tag} - referenced via {} have '{found}'",
        transcript.display(),
        referenced_from.display()
    )]
    TranscriptMismatch {
        /// Example tag.
        tag: String,
        /// Declared block kind.
        kind: String,
        /// Required opening token.
        expected: String,
        /// Transcript file.
        transcript: PathBuf,
        /// Documentation file holding the example reference.
        referenced_from: PathBuf,
        /// First line of the transcript.
        found: String,
    },

    /// A transcript exists but could not be read.
    #[error("failed to read transcript {}: {source}", path.display())]
    TranscriptUnreadable {
        /// Transcript file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// - `"io"` - File system and I/O operations
    /// - `"structure"` - Doc-block delimiter problems
    /// - `"example"` - Example references and transcript shape
    /// - `"config"` - Configuration and settings
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Read { .. } => "io",
            Self::NestedBlock { .. } | Self::UnmatchedEnd { .. } | Self::UnterminatedBlock { .. } => {
                "structure"
            },
            Self::MalformedExample { .. }
            | Self::TranscriptMismatch { .. }
            | Self::TranscriptUnreadable { .. } => "example",
            Self::Config(_) => "config",
        }
    }
}

/// Shorten a source line for inclusion in an error message.
pub(crate) fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= SNIPPET_LEN {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(SNIPPET_LEN).collect();
    short.push('…');
    short
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
