//! The serializer state machine.
//!
//! [`Serializer`] emits well-formed output through explicit calls
//! (`value_*`, `object_begin`/`object_sep`/`object_end`, `array_begin`/
//! `array_end`, `expression_begin`/`expression_end`, `annotation`). A
//! container stack validates call order — a value after the document root,
//! an annotation on a key or closer, or a missing key separator is a
//! structure error — and peer separators are written automatically.
//!
//! Token adjacency is tracked so two fragments that would lex as one token
//! get a space between them (`vec3 5`, not `vec35`).

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

use jxc_diagnostic::Error;
use jxc_ir::{
    is_valid_expression_identifier, is_valid_object_key_identifier, DateTimeValue,
    ExpressionBody, NaiveDate, Span, Value, ValueKind,
};

use crate::settings::{DateTimeMode, FloatMode, SerializerSettings};

/// Adjacency class of the last written fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastToken {
    None,
    /// Ends with an identifier/number character — must not abut another.
    Word,
    Punct,
}

/// Adjacency class of a fragment about to be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenClass {
    Word,
    Punct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PairState {
    /// Expecting a key (or `object_end`).
    Key,
    /// Key written; expecting `object_sep`.
    Sep,
    /// Separator written; expecting the value.
    Value,
}

#[derive(Clone, Copy, Debug)]
enum Container {
    Array { count: usize },
    Object { count: usize, pair: PairState },
    Expression,
}

fn write_failed(_: fmt::Error) -> Error {
    Error::structure("serializer write failed", Span::INVALID)
}

/// Stateful JXC writer over any [`fmt::Write`] target.
pub struct Serializer<W: fmt::Write> {
    out: W,
    settings: SerializerSettings,
    stack: Vec<Container>,
    last: LastToken,
    /// An annotation has been written and must be followed by a value.
    pending_annotation: bool,
    root_done: bool,
}

impl Serializer<String> {
    /// Serializer writing into a fresh string.
    pub fn new_string(settings: SerializerSettings) -> Self {
        Serializer::new(String::new(), settings)
    }
}

impl<W: fmt::Write> Serializer<W> {
    pub fn new(out: W, settings: SerializerSettings) -> Self {
        Serializer {
            out,
            settings,
            stack: Vec::new(),
            last: LastToken::None,
            pending_annotation: false,
            root_done: false,
        }
    }

    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// Finish writing: the root value must be complete and every container
    /// closed. Returns the output target.
    pub fn finish(self) -> Result<W, Error> {
        if !self.stack.is_empty() {
            return Err(Error::structure(
                "serializer finished with an unclosed container",
                Span::INVALID,
            ));
        }
        if self.pending_annotation {
            return Err(Error::structure(
                "serializer finished with a dangling annotation",
                Span::INVALID,
            ));
        }
        Ok(self.out)
    }

    // ─── Low-level writing ─────────────────────────────────────────

    fn raw(&mut self, text: &str) -> Result<(), Error> {
        self.out.write_str(text).map_err(write_failed)
    }

    /// Write one token, inserting a space when it would merge with the
    /// previous fragment.
    fn token(&mut self, text: &str, class: TokenClass) -> Result<(), Error> {
        if class == TokenClass::Word && self.last == LastToken::Word {
            self.raw(" ")?;
        }
        self.raw(text)?;
        self.last = match class {
            TokenClass::Word => LastToken::Word,
            TokenClass::Punct => LastToken::Punct,
        };
        Ok(())
    }

    fn newline_indent(&mut self, depth: usize) -> Result<(), Error> {
        self.raw("\n")?;
        let indent = self.settings.indent.clone();
        for _ in 0..depth {
            self.raw(&indent)?;
        }
        self.last = LastToken::Punct;
        Ok(())
    }

    // ─── State transitions ─────────────────────────────────────────

    /// Prepare for a value (or key, when `as_key`): write any peer
    /// separator and validate the position.
    fn pre_value(&mut self, as_key: bool) -> Result<(), Error> {
        if self.pending_annotation {
            // The annotation already claimed this position
            return Ok(());
        }
        let pretty = self.settings.pretty_print;
        let depth = self.stack.len();
        match self.stack.last().copied() {
            None => {
                if self.root_done {
                    Err(Error::structure(
                        "value written after the document root",
                        Span::INVALID,
                    ))
                } else {
                    Ok(())
                }
            }
            Some(Container::Array { count }) => {
                if count > 0 {
                    let text = self.settings.value_separator.clone();
                    self.raw(&text)?;
                    self.last = LastToken::Punct;
                }
                if pretty {
                    self.newline_indent(depth)?;
                }
                Ok(())
            }
            Some(Container::Expression) => Ok(()),
            Some(Container::Object { count, pair }) => match pair {
                PairState::Key => {
                    if !as_key {
                        return Err(Error::structure(
                            "expected an object key or object_end",
                            Span::INVALID,
                        ));
                    }
                    if count > 0 {
                        let text = self.settings.value_separator.clone();
                        self.raw(&text)?;
                        self.last = LastToken::Punct;
                    }
                    if pretty {
                        self.newline_indent(depth)?;
                    }
                    Ok(())
                }
                PairState::Sep => Err(Error::structure(
                    "missing object_sep between key and value",
                    Span::INVALID,
                )),
                PairState::Value => Ok(()),
            },
        }
    }

    /// A complete value (or key) was just written.
    fn post_value(&mut self) {
        self.pending_annotation = false;
        match self.stack.last_mut() {
            None => self.root_done = true,
            Some(Container::Array { count }) => *count += 1,
            Some(Container::Expression) => {}
            Some(Container::Object { count, pair }) => match *pair {
                PairState::Key => *pair = PairState::Sep,
                PairState::Value => {
                    *pair = PairState::Key;
                    *count += 1;
                }
                PairState::Sep => {}
            },
        }
    }

    fn scalar(&mut self, text: &str, class: TokenClass, as_key: bool) -> Result<(), Error> {
        self.pre_value(as_key)?;
        self.token(text, class)?;
        self.post_value();
        Ok(())
    }

    // ─── Annotations ───────────────────────────────────────────────

    /// Attach an annotation to the next value or container opener.
    ///
    /// Rejected on keys, closers, and doubled annotations.
    pub fn annotation(&mut self, annotation: &str) -> Result<(), Error> {
        if self.pending_annotation {
            return Err(Error::structure(
                "annotation already pending; write its value first",
                Span::INVALID,
            ));
        }
        if annotation.is_empty() {
            return Err(Error::structure("empty annotation", Span::INVALID));
        }
        if let Some(Container::Object {
            pair: PairState::Key,
            ..
        }) = self.stack.last()
        {
            return Err(Error::structure(
                "annotations are not permitted on object keys",
                Span::INVALID,
            ));
        }
        self.pre_value(false)?;
        // Annotations count as words either way: a trailing `>` still needs
        // a space before a following bare value
        self.token(annotation, TokenClass::Word)?;
        self.pending_annotation = true;
        Ok(())
    }

    // ─── Scalars ───────────────────────────────────────────────────

    pub fn value_null(&mut self) -> Result<(), Error> {
        self.scalar("null", TokenClass::Word, true)
    }

    pub fn value_bool(&mut self, value: bool) -> Result<(), Error> {
        self.scalar(if value { "true" } else { "false" }, TokenClass::Word, true)
    }

    pub fn value_int(&mut self, value: i64) -> Result<(), Error> {
        self.scalar(&value.to_string(), TokenClass::Word, true)
    }

    pub fn value_uint(&mut self, value: u64) -> Result<(), Error> {
        self.scalar(&value.to_string(), TokenClass::Word, true)
    }

    /// Integer with a unit suffix appended without separation (`50px`).
    pub fn value_int_with_suffix(&mut self, value: i64, suffix: &str) -> Result<(), Error> {
        self.scalar(&format!("{value}{suffix}"), TokenClass::Word, false)
    }

    pub fn value_int_hex(&mut self, value: i64) -> Result<(), Error> {
        let text = if value < 0 {
            format!("-0x{:x}", value.unsigned_abs())
        } else {
            format!("0x{value:x}")
        };
        self.scalar(&text, TokenClass::Word, true)
    }

    pub fn value_int_oct(&mut self, value: i64) -> Result<(), Error> {
        let text = if value < 0 {
            format!("-0o{:o}", value.unsigned_abs())
        } else {
            format!("0o{value:o}")
        };
        self.scalar(&text, TokenClass::Word, true)
    }

    pub fn value_int_bin(&mut self, value: i64) -> Result<(), Error> {
        let text = if value < 0 {
            format!("-0b{:b}", value.unsigned_abs())
        } else {
            format!("0b{value:b}")
        };
        self.scalar(&text, TokenClass::Word, true)
    }

    pub fn value_float(&mut self, value: f64) -> Result<(), Error> {
        let text = format_float(value, &self.settings);
        self.scalar(&text, TokenClass::Word, false)
    }

    /// Float with a unit suffix appended without separation (`25.25%`).
    pub fn value_float_with_suffix(&mut self, value: f64, suffix: &str) -> Result<(), Error> {
        let text = format!("{}{suffix}", format_float(value, &self.settings));
        self.scalar(&text, TokenClass::Word, false)
    }

    pub fn value_string(&mut self, value: &str) -> Result<(), Error> {
        let text = self.format_string(value);
        self.scalar(&text, TokenClass::Word, true)
    }

    pub fn value_bytes(&mut self, value: &[u8]) -> Result<(), Error> {
        let quote = self.settings.default_quote.quote_char();
        let text = format!("b64{quote}{}{quote}", BASE64_STANDARD.encode(value));
        self.scalar(&text, TokenClass::Word, false)
    }

    pub fn value_date(&mut self, value: NaiveDate) -> Result<(), Error> {
        let quote = self.settings.default_quote.quote_char();
        let text = format!("dt{quote}{}{quote}", value.format("%Y-%m-%d"));
        self.scalar(&text, TokenClass::Word, false)
    }

    pub fn value_datetime(&mut self, value: DateTimeValue) -> Result<(), Error> {
        let quote = self.settings.default_quote.quote_char();
        let body = match (value.offset, self.settings.datetime_mode) {
            (None, DateTimeMode::ForceUtc) => {
                format!("{}Z", value.datetime.format("%Y-%m-%dT%H:%M:%S"))
            }
            _ => value.to_string(),
        };
        let text = format!("dt{quote}{body}{quote}");
        self.scalar(&text, TokenClass::Word, false)
    }

    /// A bare identifier — the usual form for object keys.
    pub fn identifier(&mut self, name: &str) -> Result<(), Error> {
        if !is_valid_object_key_identifier(name) {
            return Err(Error::structure(
                format!("{name:?} is not a valid identifier"),
                Span::INVALID,
            ));
        }
        self.scalar(name, TokenClass::Word, true)
    }

    /// A standalone comment line.
    pub fn comment(&mut self, text: &str) -> Result<(), Error> {
        let depth = self.stack.len();
        self.raw("# ")?;
        self.raw(text)?;
        self.newline_indent(depth)
    }

    // ─── Containers ────────────────────────────────────────────────

    pub fn object_begin(&mut self) -> Result<(), Error> {
        self.pre_value(false)?;
        self.token("{", TokenClass::Punct)?;
        self.pending_annotation = false;
        self.stack.push(Container::Object {
            count: 0,
            pair: PairState::Key,
        });
        Ok(())
    }

    /// The separator between a key and its value.
    pub fn object_sep(&mut self) -> Result<(), Error> {
        match self.stack.last_mut() {
            Some(Container::Object { pair, .. }) if *pair == PairState::Sep => {
                *pair = PairState::Value;
            }
            _ => {
                return Err(Error::structure(
                    "object_sep outside of an object key position",
                    Span::INVALID,
                ));
            }
        }
        let text = self.settings.key_separator.clone();
        self.raw(&text)?;
        self.last = LastToken::Punct;
        Ok(())
    }

    pub fn object_end(&mut self) -> Result<(), Error> {
        if self.pending_annotation {
            return Err(Error::structure(
                "annotations are not permitted on closers",
                Span::INVALID,
            ));
        }
        match self.stack.last().copied() {
            Some(Container::Object {
                pair: PairState::Key,
                count,
            }) => {
                self.stack.pop();
                if self.settings.pretty_print && count > 0 {
                    self.newline_indent(self.stack.len())?;
                }
                self.token("}", TokenClass::Punct)?;
                self.post_value();
                Ok(())
            }
            Some(Container::Object { .. }) => Err(Error::structure(
                "object_end in the middle of a key/value pair",
                Span::INVALID,
            )),
            _ => Err(Error::structure("object_end without object_begin", Span::INVALID)),
        }
    }

    pub fn array_begin(&mut self) -> Result<(), Error> {
        self.pre_value(false)?;
        self.token("[", TokenClass::Punct)?;
        self.pending_annotation = false;
        self.stack.push(Container::Array { count: 0 });
        Ok(())
    }

    pub fn array_end(&mut self) -> Result<(), Error> {
        if self.pending_annotation {
            return Err(Error::structure(
                "annotations are not permitted on closers",
                Span::INVALID,
            ));
        }
        match self.stack.last().copied() {
            Some(Container::Array { count }) => {
                self.stack.pop();
                if self.settings.pretty_print && count > 0 {
                    self.newline_indent(self.stack.len())?;
                }
                self.token("]", TokenClass::Punct)?;
                self.post_value();
                Ok(())
            }
            _ => Err(Error::structure("array_end without array_begin", Span::INVALID)),
        }
    }

    pub fn expression_begin(&mut self) -> Result<(), Error> {
        self.pre_value(false)?;
        self.token("(", TokenClass::Punct)?;
        self.pending_annotation = false;
        self.stack.push(Container::Expression);
        Ok(())
    }

    pub fn expression_end(&mut self) -> Result<(), Error> {
        if self.pending_annotation {
            return Err(Error::structure(
                "annotations are not permitted on closers",
                Span::INVALID,
            ));
        }
        match self.stack.last() {
            Some(Container::Expression) => {
                self.stack.pop();
                self.token(")", TokenClass::Punct)?;
                self.post_value();
                Ok(())
            }
            _ => Err(Error::structure(
                "expression_end without expression_begin",
                Span::INVALID,
            )),
        }
    }

    /// One raw fragment of an expression body (an operator, identifier, or
    /// literal already rendered as source text).
    pub fn expression_token(&mut self, text: &str) -> Result<(), Error> {
        if !matches!(self.stack.last(), Some(Container::Expression)) {
            return Err(Error::structure(
                "expression_token outside of an expression",
                Span::INVALID,
            ));
        }
        let class = match text.chars().next() {
            Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '$' => TokenClass::Word,
            _ => TokenClass::Punct,
        };
        self.token(text, class)
    }

    // ─── Automatic routing ─────────────────────────────────────────

    /// Route a [`Value`] by its runtime tag, annotation and suffix
    /// metadata included. Object pairs are written in their stored order.
    pub fn value_auto(&mut self, value: &Value<'_>) -> Result<(), Error> {
        if let Some(annotation) = value.annotation.as_ref().and_then(|a| a.source()) {
            let annotation = annotation.to_string();
            self.annotation(&annotation)?;
        }
        match &value.kind {
            ValueKind::Null => self.value_null(),
            ValueKind::Bool(b) => self.value_bool(*b),
            ValueKind::Int(v) => match &value.suffix {
                Some(suffix) => self.value_int_with_suffix(*v, suffix),
                None => self.value_int(*v),
            },
            ValueKind::UInt(v) => self.value_uint(*v),
            ValueKind::Float(v) => match &value.suffix {
                Some(suffix) => self.value_float_with_suffix(*v, suffix),
                None => self.value_float(*v),
            },
            ValueKind::String(s) => self.value_string(s),
            ValueKind::Bytes(b) => self.value_bytes(b),
            ValueKind::Date(d) => self.value_date(*d),
            ValueKind::DateTime(dt) => self.value_datetime(*dt),
            ValueKind::Array(items) => {
                self.array_begin()?;
                for item in items {
                    self.value_auto(item)?;
                }
                self.array_end()
            }
            ValueKind::Object(object) => {
                self.object_begin()?;
                for (key, item) in object.iter() {
                    self.object_key(key)?;
                    self.object_sep()?;
                    self.value_auto(item)?;
                }
                self.object_end()
            }
            ValueKind::Expression(body) => {
                self.expression_begin()?;
                self.expression_body(body)?;
                self.expression_end()
            }
        }
    }

    /// Write an object key as a bare identifier when possible, quoted
    /// otherwise. `inf` and `nan` must quote — bare, they lex as numbers.
    pub fn object_key(&mut self, key: &str) -> Result<(), Error> {
        if is_valid_object_key_identifier(key) && !matches!(key, "inf" | "nan") {
            self.identifier(key)
        } else {
            self.value_string(key)
        }
    }

    fn expression_body(&mut self, body: &ExpressionBody<'_>) -> Result<(), Error> {
        match body {
            ExpressionBody::Source(src) => {
                let src = src.to_string();
                self.raw(&src)?;
                self.last = LastToken::Punct;
                Ok(())
            }
            ExpressionBody::Tokens(tokens) => {
                for token in tokens {
                    let text = token.value.to_string();
                    self.expression_token(&text)?;
                }
                Ok(())
            }
            ExpressionBody::Values(values) => {
                for value in values {
                    match &value.kind {
                        // Bare identifiers and operators stay bare so the
                        // body re-lexes to the same token sequence
                        ValueKind::String(s)
                            if is_valid_expression_identifier(s)
                                || is_expression_punctuation(s) =>
                        {
                            let text = s.to_string();
                            self.expression_token(&text)?;
                        }
                        _ => self.value_auto(value)?,
                    }
                }
                Ok(())
            }
        }
    }

    // ─── String formatting ─────────────────────────────────────────

    fn format_string(&self, value: &str) -> String {
        let quote = self.settings.default_quote.quote_char();
        if self.settings.allow_raw_strings && prefers_raw_string(value) {
            if let Some(tag) = pick_heredoc_tag(value, quote) {
                return format!("r{quote}{tag}({value}){tag}{quote}");
            }
        }
        escape_string(value, quote)
    }
}

/// `true` for non-identifier fragments safe to write bare inside an
/// expression: operator runs and single punctuation characters.
fn is_expression_punctuation(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let operators = "=!<>|&+-*/%^~";
    if s.chars().all(|c| operators.contains(c)) {
        return true;
    }
    s.len() == 1 && ",:;@?.`([{)]}\\".contains(s)
}

/// Escape-heavy payloads read better as raw heredocs.
fn prefers_raw_string(value: &str) -> bool {
    if value.contains('\n') {
        return true;
    }
    value.chars().filter(|c| matches!(c, '"' | '\'' | '\\')).count() >= 3
}

/// Find a heredoc tag whose terminator cannot appear in the body.
fn pick_heredoc_tag(value: &str, quote: char) -> Option<String> {
    let candidates = ["", "HEREDOC", "HEREDOC1", "HEREDOC2", "HEREDOC3"];
    candidates.iter().find_map(|tag| {
        let terminator = format!("){tag}{quote}");
        if value.contains(&terminator) {
            None
        } else {
            Some((*tag).to_string())
        }
    })
}

fn escape_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            c if c == quote => {
                out.push('\\');
                out.push(quote);
            }
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render a float per the settings: `nan`/`inf`/`-inf` for non-finite
/// values, shortest round-trippable or fixed-precision otherwise.
pub(crate) fn format_float(value: f64, settings: &SerializerSettings) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    match settings.float_mode {
        FloatMode::Shortest => {
            // `{:?}` for f64 is the shortest representation that parses
            // back to the same value, always with `.0` or an exponent
            let shortest = format!("{value:?}");
            let frac_digits = shortest
                .split_once('.')
                .map_or(0, |(_, frac)| frac.bytes().take_while(u8::is_ascii_digit).count());
            if frac_digits > settings.float_precision as usize {
                trim_fixed(value, settings.float_precision)
            } else {
                shortest
            }
        }
        FloatMode::Fixed {
            trim_trailing_zeros,
        } => {
            let fixed = format!("{value:.prec$}", prec = settings.float_precision as usize);
            if trim_trailing_zeros {
                trim_float_zeros(fixed)
            } else {
                fixed
            }
        }
    }
}

fn trim_fixed(value: f64, precision: u32) -> String {
    trim_float_zeros(format!("{value:.prec$}", prec = precision as usize))
}

/// `1.500` → `1.5`, `2.000` → `2.0` (one fractional digit always stays so
/// the literal re-parses as a float).
fn trim_float_zeros(mut text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use crate::settings::StringQuoteMode;
    use pretty_assertions::assert_eq;

    fn compact() -> Serializer<String> {
        Serializer::new_string(SerializerSettings::compact())
    }

    #[test]
    fn scalars_compact() {
        let mut ser = compact();
        ser.array_begin().unwrap();
        ser.value_bool(true).unwrap();
        ser.value_int(1234).unwrap();
        ser.value_string("oh hai").unwrap();
        ser.array_end().unwrap();
        assert_eq!(ser.finish().unwrap(), r#"[true,1234,"oh hai"]"#);
    }

    #[test]
    fn object_with_annotation() {
        let mut ser = compact();
        ser.annotation("quat").unwrap();
        ser.object_begin().unwrap();
        for (key, value) in [("x", 0.0), ("y", 0.0), ("z", 0.0), ("w", 1.0)] {
            ser.identifier(key).unwrap();
            ser.object_sep().unwrap();
            ser.value_float(value).unwrap();
        }
        ser.object_end().unwrap();
        assert_eq!(ser.finish().unwrap(), "quat{x:0.0,y:0.0,z:0.0,w:1.0}");
    }

    #[test]
    fn annotation_before_scalar_gets_a_space() {
        let mut ser = compact();
        ser.annotation("meters").unwrap();
        ser.value_int(5).unwrap();
        assert_eq!(ser.finish().unwrap(), "meters 5");
    }

    #[test]
    fn annotation_on_closer_is_rejected() {
        let mut ser = compact();
        ser.array_begin().unwrap();
        ser.value_int(1).unwrap();
        ser.annotation("x").unwrap();
        assert!(ser.array_end().is_err());
    }

    #[test]
    fn annotation_on_key_is_rejected() {
        let mut ser = compact();
        ser.object_begin().unwrap();
        assert!(ser.annotation("x").is_err());
    }

    #[test]
    fn doubled_values_at_root_are_rejected() {
        let mut ser = compact();
        ser.value_int(1).unwrap();
        assert!(ser.value_int(2).is_err());
    }

    #[test]
    fn missing_object_sep_is_rejected() {
        let mut ser = compact();
        ser.object_begin().unwrap();
        ser.identifier("x").unwrap();
        assert!(ser.value_int(1).is_err());
    }

    #[test]
    fn mismatched_closers_are_rejected() {
        let mut ser = compact();
        ser.array_begin().unwrap();
        assert!(ser.object_end().is_err());
        let mut ser = compact();
        assert!(ser.array_end().is_err());
    }

    #[test]
    fn finish_catches_unclosed_containers() {
        let mut ser = compact();
        ser.array_begin().unwrap();
        assert!(ser.finish().is_err());
    }

    #[test]
    fn pretty_layout() {
        let mut ser = Serializer::new_string(SerializerSettings::pretty());
        ser.object_begin().unwrap();
        ser.identifier("x").unwrap();
        ser.object_sep().unwrap();
        ser.value_int(1).unwrap();
        ser.identifier("y").unwrap();
        ser.object_sep().unwrap();
        ser.array_begin().unwrap();
        ser.value_int(2).unwrap();
        ser.value_int(3).unwrap();
        ser.array_end().unwrap();
        ser.object_end().unwrap();
        assert_eq!(
            ser.finish().unwrap(),
            "{\n    x: 1,\n    y: [\n        2,\n        3\n    ]\n}"
        );
    }

    #[test]
    fn numeric_bases_and_suffixes() {
        let mut ser = compact();
        ser.array_begin().unwrap();
        ser.value_int_hex(255).unwrap();
        ser.value_int_oct(8).unwrap();
        ser.value_int_bin(5).unwrap();
        ser.value_int_hex(-16).unwrap();
        ser.value_int_with_suffix(50, "px").unwrap();
        ser.value_float_with_suffix(25.25, "%").unwrap();
        ser.array_end().unwrap();
        assert_eq!(
            ser.finish().unwrap(),
            "[0xff,0o10,0b101,-0x10,50px,25.25%]"
        );
    }

    #[test]
    fn float_forms() {
        let settings = SerializerSettings::compact();
        assert_eq!(format_float(f64::NAN, &settings), "nan");
        assert_eq!(format_float(f64::INFINITY, &settings), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY, &settings), "-inf");
        assert_eq!(format_float(0.0, &settings), "0.0");
        assert_eq!(format_float(1.5, &settings), "1.5");
        assert_eq!(format_float(-123.456, &settings), "-123.456");

        let fixed = SerializerSettings {
            float_mode: FloatMode::Fixed {
                trim_trailing_zeros: true,
            },
            float_precision: 4,
            ..SerializerSettings::compact()
        };
        assert_eq!(format_float(1.5, &fixed), "1.5");
        assert_eq!(format_float(2.0, &fixed), "2.0");
        assert_eq!(format_float(0.12345, &fixed), "0.1235");
    }

    #[test]
    fn string_quote_modes() {
        let mut ser = Serializer::new_string(
            SerializerSettings::compact().with_quote(StringQuoteMode::Single),
        );
        ser.value_string("it's").unwrap();
        assert_eq!(ser.finish().unwrap(), r"'it\'s'");

        let mut ser = compact();
        ser.value_string("tab\tand\nnewline").unwrap();
        assert_eq!(ser.finish().unwrap(), "\"tab\\tand\\nnewline\"");
    }

    #[test]
    fn raw_string_emission() {
        let settings = SerializerSettings {
            allow_raw_strings: true,
            ..SerializerSettings::compact()
        };
        let mut ser = Serializer::new_string(settings.clone());
        ser.value_string("line one\nline two").unwrap();
        assert_eq!(ser.finish().unwrap(), "r\"(line one\nline two)\"");

        // A body containing `)"` forces a longer tag
        let mut ser = Serializer::new_string(settings);
        ser.value_string("tricky)\"\nbody").unwrap();
        assert_eq!(
            ser.finish().unwrap(),
            "r\"HEREDOC(tricky)\"\nbody)HEREDOC\""
        );
    }

    #[test]
    fn bytes_dates_datetimes() {
        use jxc_ir::{NaiveDateTime, NaiveTime};

        let mut ser = compact();
        ser.value_bytes(b"jxc format").unwrap();
        assert_eq!(ser.finish().unwrap(), "b64\"anhjIGZvcm1hdA==\"");

        let mut ser = compact();
        ser.value_date(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap())
            .unwrap();
        assert_eq!(ser.finish().unwrap(), "dt\"1969-12-31\"");

        let naive = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        );
        // Naive datetimes force a trailing Z by default
        let mut ser = compact();
        ser.value_datetime(DateTimeValue::naive(naive)).unwrap();
        assert_eq!(ser.finish().unwrap(), "dt\"2001-02-03T00:00:00Z\"");

        let mut ser = Serializer::new_string(SerializerSettings {
            datetime_mode: DateTimeMode::Unqualified,
            ..SerializerSettings::compact()
        });
        ser.value_datetime(DateTimeValue::naive(naive)).unwrap();
        assert_eq!(ser.finish().unwrap(), "dt\"2001-02-03T00:00:00\"");
    }

    #[test]
    fn expression_writing() {
        let mut ser = compact();
        ser.expression_begin().unwrap();
        ser.expression_token("1").unwrap();
        ser.expression_token("+").unwrap();
        ser.expression_token("2").unwrap();
        ser.expression_end().unwrap();
        assert_eq!(ser.finish().unwrap(), "(1+2)");

        // Adjacent words get spaced so they re-lex separately
        let mut ser = compact();
        ser.expression_begin().unwrap();
        ser.expression_token("a").unwrap();
        ser.expression_token("b").unwrap();
        ser.expression_end().unwrap();
        assert_eq!(ser.finish().unwrap(), "(a b)");
    }
}
