//! Literal decoding: token text → values.
//!
//! Each function takes a cooked [`Token`] and produces the value its text
//! denotes. The lexer calls these once for validation so failures surface
//! at lex time with the literal's span; the value constructor calls them
//! again to build values.

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use jxc_diagnostic::Error;
use jxc_ir::{
    split_number, DateTimeValue, FixedOffset, FloatLiteralKind, NumberBase, Span, Token,
};

/// A decoded numeric literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Int(i64),
    /// Produced when a non-negative literal exceeds `i64::MAX`.
    UInt(u64),
    Float(f64),
}

/// A decoded `dt"..."` literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DateTimeParsed {
    /// Bare date: `dt"2024-07-24"`.
    Date(NaiveDate),
    /// Full datetime, naive or offset-qualified.
    DateTime(DateTimeValue),
}

// ─── Strings ───────────────────────────────────────────────────────

/// Decode a string token (quoted or raw-heredoc) to its content.
///
/// Quoted strings resolve escapes; raw strings pass their body through
/// verbatim. Borrows from the token's storage when no unescaping is needed.
pub fn parse_string_token<'a>(token: &Token<'a>) -> Result<Cow<'a, str>, Error> {
    let full: &str = &token.value;

    if is_raw_string_text(full) {
        // r QUOTE TAG ( body ) TAG QUOTE
        let tag_len = token.tag.len();
        let body_start = 2 + tag_len + 1;
        let body_end = full.len().saturating_sub(tag_len + 2);
        return Ok(reborrow(token, body_start, body_end.max(body_start)));
    }

    let content_start = 1;
    let content_end = full.len().saturating_sub(1).max(content_start);
    let content = full.get(content_start..content_end).unwrap_or("");
    if !content.contains('\\') {
        return Ok(reborrow(token, content_start, content_end));
    }
    let base = if token.span.is_invalid() {
        0
    } else {
        token.span.start + 1
    };
    unescape_quoted(content, base).map(Cow::Owned)
}

fn is_raw_string_text(full: &str) -> bool {
    full.len() >= 2 && full.as_bytes()[0] == b'r' && matches!(full.as_bytes()[1], b'"' | b'\'')
}

/// Slice `start..end` of the token's text, preserving a borrowed `Cow`
/// when the token itself borrows the source.
fn reborrow<'a>(token: &Token<'a>, start: usize, end: usize) -> Cow<'a, str> {
    match &token.value {
        Cow::Borrowed(s) => Cow::Borrowed(s.get(start..end).unwrap_or("")),
        Cow::Owned(s) => Cow::Owned(s.get(start..end).unwrap_or("").to_string()),
    }
}

/// Extract the heredoc delimiter label from raw string text.
pub(crate) fn raw_string_heredoc_tag(text: &str, span: Span) -> Result<&str, Error> {
    let inner = text.get(2..).unwrap_or("");
    match inner.find('(') {
        Some(idx) => Ok(&inner[..idx]),
        None => Err(Error::lex("malformed raw string", span)),
    }
}

/// Validate the escapes of a quoted string literal without building the
/// decoded content's final resting place.
pub(crate) fn validate_quoted_string(text: &str, start: u32) -> Result<(), Error> {
    let content = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
    if content.contains('\\') {
        unescape_quoted(content, start + 1)?;
    }
    Ok(())
}

fn hex_scalar(content: &str, start: usize, count: usize, base: u32) -> Result<u32, Error> {
    let digits = content
        .get(start..start + count)
        .filter(|s| s.bytes().all(|b| b.is_ascii_hexdigit()));
    match digits {
        Some(s) => u32::from_str_radix(s, 16)
            .map_err(|_| escape_error(content, start, count, base)),
        None => Err(escape_error(content, start, count, base)),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "escape offsets are within a u32-bounded buffer"
)]
fn escape_error(content: &str, at: usize, len: usize, base: u32) -> Error {
    let snippet = content.get(at..).unwrap_or("");
    let end = base + (at + len).min(content.len()) as u32;
    Error::lex(
        format!("invalid escape sequence near {snippet:?}"),
        Span::new(base + at as u32, end.max(base + at as u32 + 1)),
    )
}

/// Resolve the escape set: `\" \' \\ \/ \b \f \n \r \t \v \0` plus
/// `\xNN`, `\uNNNN` (with surrogate pairing), and `\UNNNNNNNN`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "escape offsets are within a u32-bounded buffer"
)]
fn unescape_quoted(content: &str, base: u32) -> Result<String, Error> {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            let ch = content[i..].chars().next().unwrap_or('\u{FFFD}');
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }
        let esc_span = |len: usize| Span::new(base + i as u32, base + (i + len) as u32);
        let Some(&esc) = bytes.get(i + 1) else {
            return Err(Error::lex("trailing backslash in string", esc_span(1)));
        };
        match esc {
            b'"' => out.push('"'),
            b'\'' => out.push('\''),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'v' => out.push('\u{b}'),
            b'0' => out.push('\0'),
            b'x' => {
                let code = hex_scalar(content, i + 2, 2, base)?;
                match char::from_u32(code) {
                    Some(ch) => out.push(ch),
                    None => return Err(Error::lex("invalid \\x escape", esc_span(4))),
                }
                i += 4;
                continue;
            }
            b'u' => {
                let code = hex_scalar(content, i + 2, 4, base)?;
                if (0xD800..=0xDBFF).contains(&code) {
                    // High surrogate: a low surrogate escape must follow
                    if bytes.get(i + 6) == Some(&b'\\') && bytes.get(i + 7) == Some(&b'u') {
                        let low = hex_scalar(content, i + 8, 4, base)?;
                        if (0xDC00..=0xDFFF).contains(&low) {
                            let combined =
                                0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                            match char::from_u32(combined) {
                                Some(ch) => out.push(ch),
                                None => {
                                    return Err(Error::lex(
                                        "invalid surrogate pair",
                                        esc_span(12),
                                    ))
                                }
                            }
                            i += 12;
                            continue;
                        }
                    }
                    return Err(Error::lex("unpaired surrogate escape", esc_span(6)));
                }
                match char::from_u32(code) {
                    Some(ch) => out.push(ch),
                    None => return Err(Error::lex("invalid \\u escape", esc_span(6))),
                }
                i += 6;
                continue;
            }
            b'U' => {
                let code = hex_scalar(content, i + 2, 8, base)?;
                match char::from_u32(code) {
                    Some(ch) => out.push(ch),
                    None => {
                        return Err(Error::lex(
                            format!("\\U escape out of range: {code:#x}"),
                            esc_span(10),
                        ))
                    }
                }
                i += 10;
                continue;
            }
            other => {
                return Err(Error::lex(
                    format!("invalid escape sequence `\\{}`", other as char),
                    esc_span(2),
                ));
            }
        }
        i += 2;
    }
    Ok(out)
}

// ─── Numbers ───────────────────────────────────────────────────────

/// Decode a numeric literal to its value and unit suffix.
pub fn parse_number_token<'t>(token: &'t Token<'_>) -> Result<(NumberValue, &'t str), Error> {
    let split = split_number(&token.value).map_err(|msg| Error::lex(msg, token.span))?;

    let value = match split.kind {
        FloatLiteralKind::NotANumber => NumberValue::Float(f64::NAN),
        FloatLiteralKind::PositiveInfinity => NumberValue::Float(f64::INFINITY),
        FloatLiteralKind::NegativeInfinity => NumberValue::Float(f64::NEG_INFINITY),
        FloatLiteralKind::Finite => {
            if split.base() != NumberBase::Decimal {
                let mag = u64::from_str_radix(split.int_digits, split.base().radix())
                    .map_err(|_| {
                        Error::lex(
                            format!("integer literal {:?} out of range", &*token.value),
                            token.span,
                        )
                    })?;
                if split.is_negative() {
                    i64::try_from(-i128::from(mag))
                        .map(NumberValue::Int)
                        .map_err(|_| {
                            Error::lex(
                                format!("integer literal {:?} out of range", &*token.value),
                                token.span,
                            )
                        })?
                } else {
                    i64::try_from(mag)
                        .map(NumberValue::Int)
                        .unwrap_or(NumberValue::UInt(mag))
                }
            } else if split.is_floating_point() {
                let mut text = String::with_capacity(token.value.len());
                text.push_str(split.sign);
                text.push_str(split.int_digits);
                if !split.frac_digits.is_empty() {
                    text.push('.');
                    text.push_str(split.frac_digits);
                }
                text.push_str(split.exp);
                text.parse::<f64>().map(NumberValue::Float).map_err(|_| {
                    Error::lex(
                        format!("invalid float literal {:?}", &*token.value),
                        token.span,
                    )
                })?
            } else {
                decimal_int(split.sign, split.int_digits, split.exponent, token.span)?
            }
        }
    };
    Ok((value, split.suffix))
}

/// Decimal integer with a non-negative exponent (`1e5` is the integer
/// `100000`). Values past `u64::MAX` fall back to a float.
fn decimal_int(sign: &str, digits: &str, exponent: i32, span: Span) -> Result<NumberValue, Error> {
    let parse_err =
        |_| Error::lex(format!("integer literal {sign}{digits} out of range"), span);
    let base: i128 = digits.parse().map_err(parse_err)?;

    let scaled = u32::try_from(exponent)
        .ok()
        .and_then(|e| 10i128.checked_pow(e))
        .and_then(|pow| base.checked_mul(pow));

    let signed = match scaled {
        Some(v) if sign == "-" => -v,
        Some(v) => v,
        None => {
            // Too large for integers entirely; approximate as float
            let text = format!("{sign}{digits}e{exponent}");
            return text
                .parse::<f64>()
                .map(NumberValue::Float)
                .map_err(|_| Error::lex(format!("invalid numeric literal {text:?}"), span));
        }
    };

    if let Ok(v) = i64::try_from(signed) {
        Ok(NumberValue::Int(v))
    } else if let Ok(v) = u64::try_from(signed) {
        Ok(NumberValue::UInt(v))
    } else {
        #[allow(
            clippy::cast_precision_loss,
            reason = "fallback for literals beyond 64-bit range is documented as lossy"
        )]
        Ok(NumberValue::Float(signed as f64))
    }
}

// ─── Byte strings ──────────────────────────────────────────────────

/// Decode a `b64"..."` literal.
///
/// Whitespace anywhere inside the quotes and one optional outer pair of
/// parentheses are ignored before decoding.
pub fn parse_bytes_token(token: &Token<'_>) -> Result<Vec<u8>, Error> {
    let full: &str = &token.value;
    let content = full.get(4..full.len().saturating_sub(1)).unwrap_or("");

    let mut cleaned: Vec<u8> = content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if cleaned.len() >= 2 && cleaned.first() == Some(&b'(') && cleaned.last() == Some(&b')') {
        cleaned.remove(0);
        cleaned.pop();
    }

    BASE64_STANDARD
        .decode(&cleaned)
        .map_err(|e| Error::lex(format!("invalid base64 byte string: {e}"), token.span))
}

// ─── Datetimes ─────────────────────────────────────────────────────

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn datetime_error(content: &str, span: Span) -> Error {
    Error::lex(
        format!(
            "invalid datetime literal {content:?} \
             (expected YYYY-MM-DD or YYYY-MM-DDThh:mm:ss with optional Z or \u{b1}hh:mm offset)"
        ),
        span,
    )
}

/// Decode a `dt"..."` literal.
///
/// Strict ISO-8601 subset: four-digit year, no interior whitespace, no
/// fractional seconds; years 0001–9999.
pub fn parse_datetime_token(token: &Token<'_>) -> Result<DateTimeParsed, Error> {
    let full: &str = &token.value;
    let content = full.get(3..full.len().saturating_sub(1)).unwrap_or("");
    let err = || datetime_error(content, token.span);

    let date_part = content.get(..10).ok_or_else(err)?;
    let dashes_ok = date_part.as_bytes().get(4) == Some(&b'-')
        && date_part.as_bytes().get(7) == Some(&b'-');
    if !dashes_ok
        || !all_digits(&date_part[..4])
        || !all_digits(&date_part[5..7])
        || !all_digits(&date_part[8..10])
    {
        return Err(err());
    }
    let year: i32 = date_part[..4].parse().map_err(|_| err())?;
    let month: u32 = date_part[5..7].parse().map_err(|_| err())?;
    let day: u32 = date_part[8..10].parse().map_err(|_| err())?;
    if year == 0 {
        return Err(err());
    }
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)?;

    if content.len() == 10 {
        return Ok(DateTimeParsed::Date(date));
    }

    // Datetime: `T` then hh:mm:ss
    if content.as_bytes().get(10) != Some(&b'T') || content.len() < 19 {
        return Err(err());
    }
    let time_part = &content[11..19];
    let colons_ok =
        time_part.as_bytes().get(2) == Some(&b':') && time_part.as_bytes().get(5) == Some(&b':');
    if !colons_ok
        || !all_digits(&time_part[..2])
        || !all_digits(&time_part[3..5])
        || !all_digits(&time_part[6..8])
    {
        return Err(err());
    }
    let hour: u32 = time_part[..2].parse().map_err(|_| err())?;
    let minute: u32 = time_part[3..5].parse().map_err(|_| err())?;
    let second: u32 = time_part[6..8].parse().map_err(|_| err())?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(err)?;
    let datetime = NaiveDateTime::new(date, time);

    let rest = &content[19..];
    let value = match rest {
        "" => DateTimeValue::naive(datetime),
        "Z" => DateTimeValue::utc(datetime),
        _ => {
            let bytes = rest.as_bytes();
            if rest.len() != 6
                || !matches!(bytes[0], b'+' | b'-')
                || bytes[3] != b':'
                || !all_digits(&rest[1..3])
                || !all_digits(&rest[4..6])
            {
                return Err(err());
            }
            let oh: i32 = rest[1..3].parse().map_err(|_| err())?;
            let om: i32 = rest[4..6].parse().map_err(|_| err())?;
            if oh > 23 || om > 59 {
                return Err(err());
            }
            let mut secs = oh * 3600 + om * 60;
            if bytes[0] == b'-' {
                secs = -secs;
            }
            let offset = FixedOffset::east_opt(secs).ok_or_else(err)?;
            DateTimeValue::with_offset(datetime, offset)
        }
    };
    Ok(DateTimeParsed::DateTime(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use jxc_ir::TokenKind;
    use pretty_assertions::assert_eq;

    #[allow(clippy::cast_possible_truncation, reason = "test literals are short")]
    fn tok(kind: TokenKind, text: &str) -> Token<'_> {
        Token::new(kind, Span::new(0, text.len() as u32), text)
    }

    // === Strings ===

    fn string_value(text: &str) -> String {
        parse_string_token(&tok(TokenKind::String, text))
            .unwrap()
            .into_owned()
    }

    #[test]
    fn plain_strings() {
        assert_eq!(string_value("\"\""), "");
        assert_eq!(string_value("\"abc\""), "abc");
        assert_eq!(string_value("'abc'"), "abc");
    }

    #[test]
    fn escaped_strings() {
        assert_eq!(string_value(r#""a\nb\t\"c\"""#), "a\nb\t\"c\"");
        assert_eq!(string_value(r"'don\'t'"), "don't");
        assert_eq!(string_value(r#""\x41é\U0001F600""#), "Aé😀");
        assert_eq!(string_value(r#""😀""#), "😀");
        assert_eq!(string_value(r#""\\""#), "\\");
    }

    #[test]
    fn borrowed_when_no_escapes() {
        let token = tok(TokenKind::String, "\"plain\"");
        let parsed = parse_string_token(&token).unwrap();
        assert!(matches!(parsed, Cow::Borrowed("plain")));
    }

    #[test]
    fn bad_escapes() {
        assert!(parse_string_token(&tok(TokenKind::String, r#""\q""#)).is_err());
        assert!(parse_string_token(&tok(TokenKind::String, r#""\x4""#)).is_err());
        assert!(parse_string_token(&tok(TokenKind::String, r#""\ud800""#)).is_err());
        assert!(parse_string_token(&tok(TokenKind::String, r#""\UFFFFFFFF""#)).is_err());
    }

    #[test]
    fn raw_strings_pass_body_verbatim() {
        let token = Token::with_tag(
            TokenKind::String,
            Span::new(0, 9),
            r#"r"(abc\t\)""#,
            "",
        );
        assert_eq!(parse_string_token(&token).unwrap(), "abc\\t\\");

        let token = Token::with_tag(
            TokenKind::String,
            Span::new(0, 0),
            r#"r"HEREDOC(this is a\n raw string\t\)HEREDOC""#,
            "HEREDOC",
        );
        assert_eq!(
            parse_string_token(&token).unwrap(),
            "this is a\\n raw string\\t\\"
        );

        let token = Token::with_tag(TokenKind::String, Span::new(0, 5), "r\"()\"", "");
        assert_eq!(parse_string_token(&token).unwrap(), "");

        let token = Token::with_tag(TokenKind::String, Span::new(0, 6), "r\"(\")\"", "");
        assert_eq!(parse_string_token(&token).unwrap(), "\"");
    }

    // === Numbers ===

    fn number(text: &str) -> (NumberValue, String) {
        let token = tok(TokenKind::Number, text);
        let (value, suffix) = parse_number_token(&token).unwrap();
        (value, suffix.to_string())
    }

    #[test]
    fn integer_values() {
        assert_eq!(number("0").0, NumberValue::Int(0));
        assert_eq!(number("-123").0, NumberValue::Int(-123));
        assert_eq!(number("0xFF").0, NumberValue::Int(255));
        assert_eq!(number("0o755").0, NumberValue::Int(493));
        assert_eq!(number("0b1010").0, NumberValue::Int(10));
        assert_eq!(number("-0x10").0, NumberValue::Int(-16));
        // Positive exponent keeps integer-ness
        assert_eq!(number("1e5").0, NumberValue::Int(100_000));
    }

    #[test]
    fn large_integers_promote() {
        assert_eq!(
            number("9223372036854775807").0,
            NumberValue::Int(i64::MAX)
        );
        assert_eq!(
            number("9223372036854775808").0,
            NumberValue::UInt(9_223_372_036_854_775_808)
        );
        assert_eq!(
            number("0xFFFFFFFFFFFFFFFF").0,
            NumberValue::UInt(u64::MAX)
        );
        assert_eq!(
            number("-9223372036854775808").0,
            NumberValue::Int(i64::MIN)
        );
    }

    #[test]
    fn float_values() {
        assert_eq!(number("0.0").0, NumberValue::Float(0.0));
        assert_eq!(number("123.456").0, NumberValue::Float(123.456));
        assert_eq!(number("-123.456").0, NumberValue::Float(-123.456));
        assert_eq!(number("1e-2").0, NumberValue::Float(0.01));
        assert_eq!(number("1.5e3").0, NumberValue::Float(1500.0));
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(number("inf").0, NumberValue::Float(f64::INFINITY));
        assert_eq!(number("+inf").0, NumberValue::Float(f64::INFINITY));
        assert_eq!(number("-inf").0, NumberValue::Float(f64::NEG_INFINITY));
        match number("nan").0 {
            NumberValue::Float(f) => assert!(f.is_nan()),
            other => panic!("expected nan, got {other:?}"),
        }
    }

    #[test]
    fn suffixes_come_back_verbatim() {
        assert_eq!(number("25%"), (NumberValue::Int(25), "%".to_string()));
        assert_eq!(number("50px"), (NumberValue::Int(50), "px".to_string()));
        assert_eq!(
            number("25.25%"),
            (NumberValue::Float(25.25), "%".to_string())
        );
        assert_eq!(
            number("-50.123px"),
            (NumberValue::Float(-50.123), "px".to_string())
        );
    }

    // === Byte strings ===

    fn bytes(text: &str) -> Vec<u8> {
        parse_bytes_token(&tok(TokenKind::ByteString, text)).unwrap()
    }

    #[test]
    fn byte_string_forms() {
        assert_eq!(bytes("b64''"), b"");
        assert_eq!(bytes("b64'()'"), b"");
        assert_eq!(bytes("b64'( anhj )'"), b"jxc");
        assert_eq!(bytes("b64'anhjIGZvcm1hdA=='"), b"jxc format");
        assert_eq!(bytes("b64'( a n h j I G Z v c m 1 h d A = = )'"), b"jxc format");
        assert_eq!(bytes("b64\"anhjIGZvcm1hdA==\""), b"jxc format");
    }

    #[test]
    fn invalid_base64() {
        assert!(parse_bytes_token(&tok(TokenKind::ByteString, "b64'!!!'")).is_err());
        assert!(parse_bytes_token(&tok(TokenKind::ByteString, "b64'(anhj'")).is_err());
    }

    // === Datetimes ===

    fn datetime(text: &str) -> DateTimeParsed {
        parse_datetime_token(&tok(TokenKind::DateTime, text)).unwrap()
    }

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(y, mo, d).unwrap(),
            NaiveTime::from_hms_opt(h, mi, s).unwrap(),
        )
    }

    #[test]
    fn date_range() {
        assert_eq!(
            datetime("dt'0001-01-01'"),
            DateTimeParsed::Date(NaiveDate::from_ymd_opt(1, 1, 1).unwrap())
        );
        assert_eq!(
            datetime("dt'9999-12-31'"),
            DateTimeParsed::Date(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap())
        );
        assert_eq!(
            datetime("dt'1969-02-28'"),
            DateTimeParsed::Date(NaiveDate::from_ymd_opt(1969, 2, 28).unwrap())
        );
    }

    #[test]
    fn datetime_forms() {
        assert_eq!(
            datetime("dt'2000-01-01T12:00:00'"),
            DateTimeParsed::DateTime(DateTimeValue::naive(naive(2000, 1, 1, 12, 0, 0)))
        );
        assert_eq!(
            datetime("dt'2000-01-01T12:00:00Z'"),
            DateTimeParsed::DateTime(DateTimeValue::utc(naive(2000, 1, 1, 12, 0, 0)))
        );
        assert_eq!(
            datetime("dt'2000-01-01T12:11:00+00:00'"),
            DateTimeParsed::DateTime(DateTimeValue::utc(naive(2000, 1, 1, 12, 11, 0)))
        );
        assert_eq!(
            datetime("dt'2000-01-01T12:47:05-08:00'"),
            DateTimeParsed::DateTime(DateTimeValue::with_offset(
                naive(2000, 1, 1, 12, 47, 5),
                FixedOffset::east_opt(-8 * 3600).unwrap()
            ))
        );
        assert_eq!(
            datetime("dt'2000-01-01T12:04:52+12:30'"),
            DateTimeParsed::DateTime(DateTimeValue::with_offset(
                naive(2000, 1, 1, 12, 4, 52),
                FixedOffset::east_opt(12 * 3600 + 30 * 60).unwrap()
            ))
        );
    }

    #[test]
    fn invalid_datetimes() {
        for text in [
            "dt''",
            "dt'1-1-1'",
            "dt'98-2-22'",
            "dt' 2000-01-01 T 12:04:52 +12:30 '",
            "dt'2000-13-01'",
            "dt'2000-01-32'",
            "dt'2000-01-01T25:00:00'",
            "dt'2000-01-01T12:00'",
            "dt'2000-01-01x12:00:00'",
            "dt'2000-01-01T12:00:00+25:00'",
            "dt'0000-01-01'",
        ] {
            assert!(
                parse_datetime_token(&tok(TokenKind::DateTime, text)).is_err(),
                "{text} should be rejected"
            );
        }
    }
}
