//! # Output Formatting
//!
//! Summaries go to stdout, either as colored text for humans or as a single
//! pretty-printed JSON document for scripts. Diagnostics never go here; they
//! are emitted through `tracing` on stderr.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use docublock_core::{DocBlock, RunReport};
use serde::Serialize;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary<'a> {
    command: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
    #[serde(flatten)]
    report: &'a RunReport,
}

/// Print the outcome of an `extract` or `check` run.
///
/// `output` is the written file, if any.
pub fn print_report(
    command: &str,
    report: &RunReport,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, command, report, output, format)
}

fn write_report<W: Write>(
    out: &mut W,
    command: &str,
    report: &RunReport,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = RunSummary {
                command,
                success: report.is_success(),
                output,
                report,
            };
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        },
        OutputFormat::Text => {
            let status = if report.is_success() {
                "✓".green()
            } else {
                "!".yellow()
            };
            writeln!(
                out,
                "{status} {command}: {} files, {} doc-blocks, {} examples",
                report.files_scanned, report.blocks, report.examples_rendered
            )?;
            if let Some(path) = output {
                writeln!(out, "  wrote {}", path.display().to_string().cyan())?;
            }
            if !report.is_success() {
                writeln!(
                    out,
                    "{} {} example transcript(s) missing:",
                    "!".yellow(),
                    report.missing.len()
                )?;
                for missing in &report.missing {
                    writeln!(
                        out,
                        "  {} ({}) referenced from {}",
                        missing.tag.bold(),
                        missing.kind,
                        missing.referenced_from.display()
                    )?;
                    writeln!(out, "    expected at {}", missing.expected_at.display())?;
                }
            }
        },
    }
    Ok(())
}

/// Print the doc-blocks found in one or more files.
pub fn print_blocks(blocks: &[DocBlock], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_blocks(&mut out, blocks, format)
}

fn write_blocks<W: Write>(out: &mut W, blocks: &[DocBlock], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, blocks)?;
            writeln!(out)?;
        },
        OutputFormat::Text => {
            for block in blocks {
                writeln!(
                    out,
                    "{}:{}-{} {}",
                    block.path.display(),
                    block.start_line + 1,
                    block.end_line,
                    block.name.bold()
                )?;
            }
        },
    }
    Ok(())
}
