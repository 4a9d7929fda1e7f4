//! JXC — a structured data interchange format.
//!
//! JXC is a strict superset of JSON with typed annotations, numeric unit
//! suffixes, multiple string flavors (quoted, raw-heredoc, base64 byte
//! strings, datetime strings), comments, and parenthesized *expression*
//! values whose bodies are token streams.
//!
//! ```
//! let value = jxc::loads("vec3{ x: 1, y: 2, z: 3 }")?;
//! assert_eq!(value.get_key("y").and_then(|v| v.as_i64()), Some(2));
//! assert_eq!(jxc::dumps(&value)?, "vec3{x:1,y:2,z:3}");
//! # Ok::<(), jxc::Error>(())
//! ```
//!
//! The crate is a facade over the pipeline crates:
//!
//! - [`lex`] — token stream ([`jxc_lexer`])
//! - [`elements`] — element stream ([`jxc_parse`])
//! - [`loads`] / [`Parser`] — value construction with hooks ([`jxc_decode`])
//! - [`dumps`] / [`Serializer`] / [`Encoder`] — serialization ([`jxc_fmt`])
//!
//! Errors carry a byte span and render a caret snippet via
//! [`Error::render`]; the ones returned here are already enriched with
//! line/column information.

pub use jxc_diagnostic::{Error, ErrorInfo, ErrorKind};
pub use jxc_ir::{
    Annotation, DateTimeValue, Element, ElementKind, ExpressionBody, FloatLiteralKind,
    NumberSplit, Object, Span, Token, TokenKind, Value, ValueKind,
};
pub use jxc_ir::{join_number, split_number};

pub use jxc_decode::{
    AnnotationConstructor, ClassDecoder, ClassRegistry, ExprParseMode, ObjectPolicy, OwnedValue,
    ParseOptions, Parser,
};
pub use jxc_fmt::{
    DateTimeMode, Encoder, FloatMode, Serializer, SerializerSettings, StringQuoteMode, ToJxc,
};
pub use jxc_lexer::{Lexer, NumberValue};
pub use jxc_parse::ElementParser;

/// Parse a document into a [`Value`] with default options.
///
/// Unknown annotations and number suffixes attach to the value as
/// metadata; expression bodies materialize as value lists. Use [`Parser`]
/// directly to register hooks or change options.
pub fn loads(src: &str) -> Result<OwnedValue, Error> {
    Parser::new(src).parse().map_err(|err| err.enriched(src))
}

/// Parse with explicit [`ParseOptions`].
pub fn loads_with(src: &str, options: ParseOptions) -> Result<OwnedValue, Error> {
    Parser::with_options(src, options)
        .parse()
        .map_err(|err| err.enriched(src))
}

/// Serialize a value in the compact form.
pub fn dumps(value: &Value<'_>) -> Result<String, Error> {
    jxc_fmt::to_string_compact(value)
}

/// Serialize a value with explicit [`SerializerSettings`].
pub fn dumps_with(value: &Value<'_>, settings: &SerializerSettings) -> Result<String, Error> {
    jxc_fmt::to_string(value, settings)
}

/// Serialize a value in the pretty (indented) form.
pub fn dumps_pretty(value: &Value<'_>) -> Result<String, Error> {
    jxc_fmt::to_string(value, &SerializerSettings::pretty())
}

/// Lex a document into its token stream (comments and line breaks
/// included). Halts at the first error.
pub fn lex(src: &str) -> Result<Vec<Token<'_>>, Error> {
    jxc_lexer::lex(src).map_err(|err| err.enriched(src))
}

/// Parse a document into its element stream. Halts at the first error.
pub fn elements(src: &str) -> Result<Vec<Element<'_>>, Error> {
    jxc_parse::elements(src).map_err(|err| err.enriched(src))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests;
