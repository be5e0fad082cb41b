//! # docublock-core
//!
//! Extraction of documentation fragments ("doc-blocks") embedded in source
//! comments, and rendering of the example transcripts they reference.
//!
//! ## Architecture
//!
//! - **Line classification** ([`line`]): strips `///` decoration and recognizes markers
//! - **Block scanning** ([`scanner`]): pairs `@startDocuBlock` / `@endDocuBlock` lines
//! - **Example rendering** ([`example`]): turns a transcript into long and short views
//! - **Aggregation** ([`aggregate`]): writes the consolidated stream and the [`RunReport`]
//!
//! Discovery, configuration and catalog seeding are thin layers around these.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docublock_core::{Config, run};
//! use std::path::Path;
//!
//! let config = Config::discover(None, Path::new("."))?;
//! let report = run(&config)?;
//! if !report.is_success() {
//!     eprintln!("{} examples are missing", report.missing.len());
//! }
//! # Ok::<(), docublock_core::Error>(())
//! ```

/// Consolidated stream assembly
pub mod aggregate;
/// Error-code catalog seeding
pub mod catalog;
/// Configuration loading and validation
pub mod config;
/// Source file discovery
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// Example transcript parsing and rendering
pub mod example;
/// Comment decoration stripping
pub mod line;
/// Run outcome accumulation
pub mod report;
/// Doc-block region scanning
pub mod scanner;
/// Transcript lookup
pub mod transcript;

pub use aggregate::{Aggregator, check, example_tag, run};
pub use config::{CONFIG_FILE_NAME, Config, SearchRoot};
pub use error::{Error, Result};
pub use example::{ExampleKind, RenderedExample, parse_transcript, render_example, write_fragment};
pub use line::{Line, classify, normalize};
pub use report::{MissingTranscript, RunReport};
pub use scanner::{DocBlock, DraftPolicy, scan_file, scan_lines, scan_text};
pub use transcript::TranscriptStore;
