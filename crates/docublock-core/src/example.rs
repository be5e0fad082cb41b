//! Example transcript classification and dual-view rendering.
//!
//! An example reference names a pre-captured transcript (`<tag>.generated`)
//! and the grammar it is written in. Rendering splits the transcript into a
//! long view (everything) and a short view (the interesting part only), then
//! writes a fragment with two containers so the presentation layer can show
//! the short view and reveal the long one on click.
//!
//! ## Grammars
//!
//! | Kind | Marker | Short view keeps | Summarized away |
//! |------|--------|------------------|-----------------|
//! | [`ExampleKind::Session`] | `@EXAMPLE_ARANGOSH_OUTPUT` | prompt lines | command output |
//! | [`ExampleKind::Http`] | `@EXAMPLE_ARANGOSH_RUN` | call + headers | response body |
//! | [`ExampleKind::Query`] | `@EXAMPLE_AQL` | query + bind values | results |
//!
//! The short view is only offered when it saves at least
//! [`SHORTABLE_MIN_DELTA`] lines.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::{Error, Result};

/// Minimum number of lines the short view has to save to be offered.
pub const SHORTABLE_MIN_DELTA: usize = 5;

const SESSION_PROMPT: &str = "arangosh&gt;";
const SESSION_CONTINUATION: &str = "........&gt;";
const HTTP_CALL: &str = "shell> curl";
const HTTP_CALL_ESCAPED: &str = "shell&gt; curl";
const HTTP_STATUS: &str = "HTTP/";
const HTTP_BODY: &str = "{";
const QUERY_SECTION: &str = "@Q";
const BIND_SECTION: &str = "@B";
const RESULT_SECTION: &str = "@R";

/// Transcript grammar declared by an example marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    /// Interactive shell session: prompt lines followed by their output.
    Session,
    /// HTTP call transcript: command line, response headers, response body.
    Http,
    /// Query transcript split into query, bind-value and result sections.
    Query,
}

impl ExampleKind {
    /// All kinds, in marker precedence order.
    pub const ALL: [Self; 3] = [Self::Session, Self::Http, Self::Query];

    /// Marker that opens an example of this kind.
    pub const fn begin_marker(self) -> &'static str {
        match self {
            Self::Session => "@EXAMPLE_ARANGOSH_OUTPUT",
            Self::Http => "@EXAMPLE_ARANGOSH_RUN",
            Self::Query => "@EXAMPLE_AQL",
        }
    }

    /// Marker that closes an example of this kind.
    pub const fn end_marker(self) -> &'static str {
        match self {
            Self::Session => "@END_EXAMPLE_ARANGOSH_OUTPUT",
            Self::Http => "@END_EXAMPLE_ARANGOSH_RUN",
            Self::Query => "@END_EXAMPLE_AQL",
        }
    }

    /// Kind whose begin marker occurs in `text`.
    pub fn from_begin_marker(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| text.contains(kind.begin_marker()))
    }

    /// Kind whose end marker occurs in `text`.
    pub fn from_end_marker(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| text.contains(kind.end_marker()))
    }

    /// Short name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Session => "arangosh",
            Self::Http => "curl",
            Self::Query => "AQL",
        }
    }

    /// Caption of the button revealing the long view.
    pub const fn show_label(self) -> &'static str {
        match self {
            Self::Session => "show execution results",
            Self::Http => "show response body",
            Self::Query => "show query result",
        }
    }

    // Query transcripts open their own <pre> sections.
    const fn wraps_pre(self) -> bool {
        !matches!(self, Self::Query)
    }

    fn check_opening(self, first: &str) -> Option<&'static str> {
        match self {
            Self::Session if !first.starts_with(SESSION_PROMPT) => Some(SESSION_PROMPT),
            Self::Http if !(first.starts_with(HTTP_CALL) || first.starts_with(HTTP_CALL_ESCAPED)) => {
                Some(HTTP_CALL)
            },
            _ => None,
        }
    }
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Long and short rendering of one transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedExample {
    /// Complete transcript, reformatted for display.
    pub long_text: String,
    /// Number of transcript lines copied into `long_text`.
    pub long_lines: usize,
    /// Abbreviated view.
    pub short_text: String,
    /// Number of transcript lines copied into `short_text`.
    pub short_lines: usize,
    /// Whether the short view is worth offering.
    pub shortable: bool,
}

impl RenderedExample {
    fn push_long(&mut self, line: &str) {
        self.long_text.push_str(line);
        self.long_lines += 1;
    }

    fn push_short(&mut self, line: &str) {
        self.short_text.push_str(line);
        self.short_lines += 1;
    }

    fn push_heading(&mut self, heading: &str, short: bool) {
        self.long_text.push_str(heading);
        if short {
            self.short_text.push_str(heading);
        }
    }

    fn finish(mut self) -> Self {
        if self.long_lines.saturating_sub(self.short_lines) < SHORTABLE_MIN_DELTA {
            self.shortable = false;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Prompt,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpState {
    Command,
    Header,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryState {
    Query,
    BindValues,
    Result,
}

/// Per-kind parser state.
#[derive(Debug, Clone, Copy)]
enum Grammar {
    Session(SessionState),
    Http(HttpState),
    Query(QueryState),
}

impl Grammar {
    const fn new(kind: ExampleKind) -> Self {
        match kind {
            ExampleKind::Session => Self::Session(SessionState::Prompt),
            ExampleKind::Http => Self::Http(HttpState::Command),
            ExampleKind::Query => Self::Query(QueryState::Query),
        }
    }

    fn feed(&mut self, line: &str, view: &mut RenderedExample) {
        match self {
            Self::Session(state) => {
                if line.starts_with(SESSION_PROMPT) || line.starts_with(SESSION_CONTINUATION) {
                    view.push_short(line);
                    *state = SessionState::Prompt;
                } else if *state == SessionState::Prompt {
                    view.shortable = true;
                    *state = SessionState::Output;
                }
            },
            Self::Http(state) => {
                if line.starts_with(HTTP_CALL) || line.starts_with(HTTP_CALL_ESCAPED) {
                    *state = HttpState::Command;
                } else if *state == HttpState::Command && line.starts_with(HTTP_STATUS) {
                    *state = HttpState::Header;
                } else if *state == HttpState::Header && line.starts_with(HTTP_BODY) {
                    *state = HttpState::Body;
                }

                if *state == HttpState::Body {
                    view.shortable = true;
                } else {
                    view.push_short(line);
                }
            },
            Self::Query(state) => {
                if line.starts_with(QUERY_SECTION) {
                    *state = QueryState::Query;
                    view.push_heading("<strong>Query:</strong>\n<pre>\n", true);
                    return;
                }
                if line.starts_with(BIND_SECTION) {
                    *state = QueryState::BindValues;
                    view.push_heading("</pre>\n<strong>Bind Values:</strong>\n<pre>\n", true);
                    return;
                }
                if line.starts_with(RESULT_SECTION) {
                    *state = QueryState::Result;
                    view.shortable = true;
                    view.push_heading("</pre>\n<strong>Results:</strong>\n<pre>\n", false);
                    return;
                }
                if *state != QueryState::Result {
                    view.push_short(line);
                }
            },
        }
        view.push_long(line);
    }
}

/// Split transcript `content` into its long and short views.
///
/// `transcript` and `referenced_from` only feed diagnostics.
pub fn parse_transcript(
    content: &str,
    kind: ExampleKind,
    tag: &str,
    transcript: &Path,
    referenced_from: &Path,
) -> Result<RenderedExample> {
    let content = if content.contains('\r') {
        content.replace("\r\n", "\n")
    } else {
        content.to_string()
    };

    let mut lines = content.split_inclusive('\n').peekable();
    if let Some(first) = lines.peek() {
        if let Some(expected) = kind.check_opening(first) {
            return Err(Error::TranscriptMismatch {
                tag: tag.to_string(),
                kind: kind.name().to_string(),
                expected: expected.to_string(),
                transcript: transcript.to_path_buf(),
                referenced_from: referenced_from.to_path_buf(),
                found: first.trim_end().to_string(),
            });
        }
    }

    let mut grammar = Grammar::new(kind);
    let mut view = RenderedExample::default();
    for line in lines {
        grammar.feed(line, &mut view);
    }
    Ok(view.finish())
}

/// Write the dual-view fragment for `rendered` to `out`.
pub fn write_fragment<W: Write>(
    out: &mut W,
    tag: &str,
    kind: ExampleKind,
    rendered: &RenderedExample,
) -> std::io::Result<()> {
    let long_tag = format!("{tag}_long");
    let short_tag = format!("{tag}_short");

    writeln!(out)?;
    writeln!(out, "<div id=\"{tag}_container\">")?;
    if rendered.shortable {
        writeln!(out, "<div id=\"{long_tag}\" onclick=\"\" style=\"Display: none;\">")?;
    } else {
        writeln!(out, "<div id=\"{long_tag}\">")?;
    }
    if kind.wraps_pre() {
        writeln!(out, "<pre>")?;
    }
    write!(out, "{}", rendered.long_text)?;
    writeln!(out, "</pre>")?;
    writeln!(out, "</div>")?;

    if rendered.shortable {
        writeln!(
            out,
            "<div id=\"{short_tag}\" onclick=\"$('#{short_tag}').hide(); $('#{long_tag}').show();\">"
        )?;
        if kind.wraps_pre() {
            writeln!(out, "<pre>")?;
        }
        write!(out, "{}", rendered.short_text)?;
        writeln!(
            out,
            "</pre><div class=\"example_show_button\">{}</div>",
            kind.show_label()
        )?;
        writeln!(out, "</div>")?;
    }

    writeln!(out, "</div>")?;
    writeln!(out)?;
    Ok(())
}

/// Load, parse and render one transcript into `out`.
///
/// An unreadable transcript is fatal; callers check for existence first via
/// [`TranscriptStore::resolve`](crate::TranscriptStore::resolve).
pub fn render_example<W: Write>(
    out: &mut W,
    transcript: &Path,
    tag: &str,
    kind: ExampleKind,
    referenced_from: &Path,
) -> Result<RenderedExample> {
    let content = std::fs::read_to_string(transcript).map_err(|source| Error::TranscriptUnreadable {
        path: transcript.to_path_buf(),
        source,
    })?;

    let rendered = parse_transcript(&content, kind, tag, transcript, referenced_from)?;
    debug!(
        tag,
        kind = kind.name(),
        long = rendered.long_lines,
        short = rendered.short_lines,
        shortable = rendered.shortable,
        "rendered example"
    );
    write_fragment(out, tag, kind, &rendered)?;
    Ok(rendered)
}
