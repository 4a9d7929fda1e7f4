//! Located errors for the JXC parsing and serialization core.
//!
//! Every failure carries an [`ErrorInfo`]: a message plus the byte span of
//! the offending source. [`ErrorInfo::enrich`] derives 1-based line/column
//! from the buffer, and [`ErrorInfo::render`] produces a multi-line snippet
//! that underlines the span.
//!
//! Errors are not recoverable — the first one halts the operation and is
//! surfaced to the caller.

mod line_table;
mod snippet;

pub use line_table::LineOffsetTable;

use jxc_ir::Span;

/// Category of a failure, distinguishable without string matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad escape, unterminated literal, invalid numeric or datetime syntax.
    Lex,
    /// Mismatched bracket, missing colon, value in key position,
    /// annotation on a closer.
    Structure,
    /// Unknown annotation in strict mode, or malformed annotation tokens.
    Annotation,
    /// Unknown number suffix in strict mode.
    Suffix,
    /// A user hook failed, or a construct-mode/shape mismatch.
    Constructor,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Lex => "lex",
            ErrorKind::Structure => "structure",
            ErrorKind::Annotation => "annotation",
            ErrorKind::Suffix => "suffix",
            ErrorKind::Constructor => "constructor",
        };
        f.write_str(name)
    }
}

/// Message plus location for one failure.
///
/// `line` and `col` are 0 until [`enrich`](ErrorInfo::enrich) is called with
/// the source buffer (they are 1-based once known).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    /// Byte span of the offending source; [`Span::INVALID`] when unknown.
    pub span: Span,
    /// 1-based line, or 0 when not yet derived.
    pub line: u32,
    /// 1-based column, or 0 when not yet derived.
    pub col: u32,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ErrorInfo {
            message: message.into(),
            span,
            line: 0,
            col: 0,
        }
    }

    /// Error with no source location.
    pub fn unlocated(message: impl Into<String>) -> Self {
        ErrorInfo::new(message, Span::INVALID)
    }

    /// Derive 1-based line/column from the source buffer.
    ///
    /// Idempotent; a no-op when the span is invalid.
    pub fn enrich(&mut self, source: &str) {
        if self.span.is_invalid() || self.line != 0 {
            return;
        }
        let table = LineOffsetTable::build(source);
        let (line, col) = table.offset_to_line_col(source, self.span.start);
        self.line = line;
        self.col = col;
    }

    /// Render the message with a source snippet underlining the span.
    ///
    /// Enrichment happens internally; the stored line/col are not required.
    pub fn render(&self, source: &str) -> String {
        snippet::render(self, source)
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if self.line > 0 {
            write!(f, " at line {}, col {}", self.line, self.col)?;
        } else if !self.span.is_invalid() {
            write!(f, " at {}", self.span)?;
        }
        Ok(())
    }
}

/// A located failure from any layer of the core.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {info}")]
pub struct Error {
    pub kind: ErrorKind,
    pub info: ErrorInfo,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Error {
            kind,
            info: ErrorInfo::new(message, span),
        }
    }

    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Error::new(ErrorKind::Lex, message, span)
    }

    pub fn structure(message: impl Into<String>, span: Span) -> Self {
        Error::new(ErrorKind::Structure, message, span)
    }

    pub fn annotation(message: impl Into<String>, span: Span) -> Self {
        Error::new(ErrorKind::Annotation, message, span)
    }

    pub fn suffix(message: impl Into<String>, span: Span) -> Self {
        Error::new(ErrorKind::Suffix, message, span)
    }

    pub fn constructor(message: impl Into<String>, span: Span) -> Self {
        Error::new(ErrorKind::Constructor, message, span)
    }

    /// Byte span of the offending source.
    pub fn span(&self) -> Span {
        self.info.span
    }

    /// Derive line/col from the source buffer (idempotent).
    #[must_use]
    pub fn enriched(mut self, source: &str) -> Self {
        self.info.enrich(source);
        self
    }

    /// Full rendering: headline plus underlined source snippet.
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("{} error: ", self.kind);
        out.push_str(&self.info.render(source));
        out
    }
}
