//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! Main dispatch covers the first byte of every token family; each arm
//! calls a focused method that advances the cursor and returns
//! `RawToken { tag, len }`. Error conditions are encoded as `RawTag`
//! variants, not as `Result::Err`, so the scanner never allocates except
//! for the heredoc terminator needle of raw strings.

use crate::cursor::Cursor;
use crate::tag::{LexMode, RawTag, RawToken};

/// Characters that fuse into operator runs inside expressions.
#[inline]
fn is_operator_char(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'!' | b'<' | b'>' | b'|' | b'&' | b'+' | b'-' | b'*' | b'/' | b'%' | b'^' | b'~'
    )
}

/// `[A-Za-z_$]` — first byte of a plain identifier.
#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

/// `[A-Za-z_$0-9]` — continuation byte of a plain identifier.
#[inline]
fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// `[A-Za-z_$*]` — first byte of an object-key segment.
#[inline]
fn is_key_start(b: u8) -> bool {
    is_ident_start(b) || b == b'*'
}

/// `[A-Za-z_$*0-9]` — continuation byte of an object-key segment.
#[inline]
fn is_key_char(b: u8) -> bool {
    is_ident_char(b) || b == b'*'
}

/// Characters allowed in a raw-string heredoc tag: printable ASCII minus
/// parentheses, quotes, and backslash. Whitespace and NUL are excluded by
/// `is_ascii_graphic`.
#[inline]
fn is_heredoc_tag_char(b: u8) -> bool {
    b.is_ascii_graphic() && !matches!(b, b'(' | b')' | b'"' | b'\'' | b'\\')
}

/// Longest permitted heredoc tag.
const MAX_HEREDOC_TAG_LEN: u32 = 16;

/// Dedicated tag for a single punctuation byte, if it has one.
fn single_tag(b: u8) -> Option<RawTag> {
    Some(match b {
        b'!' => RawTag::ExclamationPoint,
        b'.' => RawTag::Period,
        b',' => RawTag::Comma,
        b':' => RawTag::Colon,
        b';' => RawTag::Semicolon,
        b'=' => RawTag::Equals,
        b'?' => RawTag::QuestionMark,
        b'@' => RawTag::AtSymbol,
        b'|' => RawTag::Pipe,
        b'&' => RawTag::Ampersand,
        b'%' => RawTag::Percent,
        b'*' => RawTag::Asterisk,
        b'+' => RawTag::Plus,
        b'-' => RawTag::Minus,
        b'/' => RawTag::Slash,
        b'\\' => RawTag::Backslash,
        b'^' => RawTag::Caret,
        b'~' => RawTag::Tilde,
        b'`' => RawTag::Backtick,
        b'{' => RawTag::BraceOpen,
        b'}' => RawTag::BraceClose,
        b'[' => RawTag::SquareBracketOpen,
        b']' => RawTag::SquareBracketClose,
        b'<' => RawTag::AngleBracketOpen,
        b'>' => RawTag::AngleBracketClose,
        b'(' => RawTag::ParenOpen,
        b')' => RawTag::ParenClose,
        _ => return None,
    })
}

/// Allocation-free scanner producing one token per call.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    /// Create a scanner at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        RawScanner {
            cursor: Cursor::new(src),
        }
    }

    /// Create a scanner from an existing cursor position.
    pub fn from_cursor(cursor: Cursor<'a>) -> Self {
        RawScanner { cursor }
    }

    /// The underlying cursor (for slicing token text by span).
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    /// Produce the next raw token under the given mode.
    ///
    /// Returns `RawTag::Eof` with `len == 0` once the source is exhausted;
    /// subsequent calls keep returning `Eof`.
    pub fn next_token(&mut self, mode: LexMode) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 if self.cursor.is_eof() => RawToken {
                tag: RawTag::Eof,
                len: 0,
            },
            b' ' | b'\t' => {
                self.cursor.eat_whitespace();
                self.tok(RawTag::Whitespace, start)
            }
            b'\n' => {
                self.cursor.advance();
                self.tok(RawTag::Newline, start)
            }
            b'\r' => self.carriage_return(start),
            b'#' => {
                self.cursor.advance();
                self.cursor.eat_until_newline_or_eof();
                self.tok(RawTag::Comment, start)
            }
            b'"' | b'\'' => {
                let quote = self.cursor.current();
                self.string(start, quote)
            }
            b if is_ident_start(b) => self.ident_or_prefixed_string(start, mode),
            b'*' if mode == LexMode::ObjectKey => self.object_key_ident(start),
            b'0'..=b'9' => {
                self.cursor.advance();
                self.number_body(start)
            }
            b'+' | b'-' if mode != LexMode::Expression => self.sign(start),
            b if mode == LexMode::Expression && is_operator_char(b) => self.operator_run(start),
            b => match single_tag(b) {
                Some(tag) => {
                    self.cursor.advance();
                    self.tok(tag, start)
                }
                None => {
                    self.cursor.advance_char();
                    self.tok(RawTag::InvalidByte, start)
                }
            },
        }
    }

    #[inline]
    fn tok(&self, tag: RawTag, start: u32) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'\n' {
            // CRLF collapses into one line break
            self.cursor.advance();
            self.tok(RawTag::Newline, start)
        } else {
            // Lone \r counts as horizontal whitespace
            self.tok(RawTag::Whitespace, start)
        }
    }

    // ─── Identifiers & prefixed strings ────────────────────────────

    fn ident_or_prefixed_string(&mut self, start: u32, mode: LexMode) -> RawToken {
        if mode == LexMode::ObjectKey {
            return self.object_key_ident(start);
        }
        self.cursor.advance();
        self.cursor.eat_while(is_ident_char);

        // `r"..."`, `b64"..."`, `dt"..."` — a string prefix is only a prefix
        // when a quote follows immediately.
        let quote = self.cursor.current();
        if quote == b'"' || quote == b'\'' {
            match self.cursor.slice_from(start) {
                "r" => return self.raw_string(start, quote),
                "b64" => return self.bytes_string(start, quote),
                "dt" => return self.datetime_string(start, quote),
                _ => {}
            }
        }
        self.tok(RawTag::Ident, start)
    }

    /// Object-key identifier: `*`- and `$`-bearing segments joined by `.`
    /// or `-` (`a.b`, `a.*.c`, `$icon`, `font-size`).
    fn object_key_ident(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_key_char);
        loop {
            let c = self.cursor.current();
            if (c == b'.' || c == b'-') && is_key_start(self.cursor.peek()) {
                self.cursor.advance();
                self.cursor.eat_while(is_key_char);
            } else {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        let extended = text
            .bytes()
            .any(|b| matches!(b, b'.' | b'-' | b'*'));
        if extended {
            self.tok(RawTag::ObjectKeyIdent, start)
        } else {
            self.tok(RawTag::Ident, start)
        }
    }

    // ─── Numbers ───────────────────────────────────────────────────

    /// `+`/`-` outside expressions: the sign of a number, the sign of an
    /// `inf`/`nan` word, or a bare operator token.
    fn sign(&mut self, start: u32) -> RawToken {
        let sign = self.cursor.current();
        self.cursor.advance();
        match self.cursor.current() {
            b'0'..=b'9' => {
                self.cursor.advance();
                self.number_body(start)
            }
            b if is_ident_start(b) => {
                // `+inf`, `-inf`, `+nan` — the cooking layer rejects any
                // other word here as an invalid numeric literal.
                self.cursor.eat_while(is_ident_char);
                self.tok(RawTag::Number, start)
            }
            _ => {
                let tag = if sign == b'+' {
                    RawTag::Plus
                } else {
                    RawTag::Minus
                };
                self.tok(tag, start)
            }
        }
    }

    /// Scan the remainder of a number whose first digit was consumed.
    fn number_body(&mut self, start: u32) -> RawToken {
        let first_digit = self.cursor.slice_from(start).bytes().next_back();

        // Base prefixes, only when a digit of that base follows (`0b` with
        // no binary digit is the decimal 0 with suffix `b`).
        if first_digit == Some(b'0') {
            match self.cursor.current() {
                b'x' | b'X' if self.cursor.peek().is_ascii_hexdigit() => {
                    self.cursor.advance();
                    self.cursor.eat_while(|b| b.is_ascii_hexdigit());
                    return self.number_suffix(start);
                }
                b'o' | b'O' if matches!(self.cursor.peek(), b'0'..=b'7') => {
                    self.cursor.advance();
                    self.cursor.eat_while(|b| matches!(b, b'0'..=b'7'));
                    return self.number_suffix(start);
                }
                b'b' | b'B' if matches!(self.cursor.peek(), b'0' | b'1') => {
                    self.cursor.advance();
                    self.cursor.eat_while(|b| matches!(b, b'0' | b'1'));
                    return self.number_suffix(start);
                }
                _ => {}
            }
        }

        self.cursor.eat_while(|b| b.is_ascii_digit());

        // Fraction: a dot only belongs to the number when a digit follows
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        // Exponent: `e` only belongs to the number when digits follow;
        // otherwise it starts a suffix (`1.5em`)
        if matches!(self.cursor.current(), b'e' | b'E') {
            let p = self.cursor.peek();
            if p.is_ascii_digit() {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit());
            } else if matches!(p, b'+' | b'-') && self.cursor.peek2().is_ascii_digit() {
                self.cursor.advance_n(2);
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
        }

        self.number_suffix(start)
    }

    /// Optional unit suffix: `[A-Za-z_][A-Za-z0-9_]*`, or a sole `%`.
    fn number_suffix(&mut self, start: u32) -> RawToken {
        match self.cursor.current() {
            b'%' => self.cursor.advance(),
            b if b.is_ascii_alphabetic() || b == b'_' => {
                self.cursor
                    .eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
            }
            _ => {}
        }
        self.tok(RawTag::Number, start)
    }

    // ─── Strings ───────────────────────────────────────────────────

    fn string(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance();
        loop {
            let b = self.cursor.skip_to_string_delim(quote);
            if b == quote {
                self.cursor.advance();
                return self.tok(RawTag::String, start);
            }
            match b {
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                // Quoted strings are single-line; 0 is end of input
                _ => return self.tok(RawTag::UnterminatedString, start),
            }
        }
    }

    /// `r"TAG(body)TAG"` — cursor sits on the quote after the `r`.
    fn raw_string(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance();
        let tag_start = self.cursor.pos();
        self.cursor.eat_while(is_heredoc_tag_char);
        let tag_len = self.cursor.pos() - tag_start;
        if tag_len > MAX_HEREDOC_TAG_LEN || self.cursor.current() != b'(' {
            return self.tok(RawTag::MalformedRawString, start);
        }
        let tag = self.cursor.slice(tag_start, tag_start + tag_len);
        self.cursor.advance();

        // Body runs verbatim (newlines included) to the `)TAG"` terminator
        let mut needle = Vec::with_capacity(tag.len() + 2);
        needle.push(b')');
        needle.extend_from_slice(tag.as_bytes());
        needle.push(quote);
        match self.cursor.find_forward(&needle) {
            Some(term) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "needle length is at most 18 bytes"
                )]
                let end = term + needle.len() as u32;
                self.cursor.advance_n(end - self.cursor.pos());
                self.tok(RawTag::RawString, start)
            }
            None => {
                self.cursor.advance_n(self.cursor.source_len() - self.cursor.pos());
                self.tok(RawTag::UnterminatedString, start)
            }
        }
    }

    /// `b64"..."` — content (including line breaks) validated in the
    /// cooking layer; the scanner only finds the closing quote.
    fn bytes_string(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance();
        if self.cursor.seek_byte(quote) {
            self.cursor.advance();
            self.tok(RawTag::BytesString, start)
        } else {
            self.tok(RawTag::UnterminatedString, start)
        }
    }

    /// `dt"..."` — single-line; content validated in the cooking layer.
    fn datetime_string(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance();
        loop {
            let b = self.cursor.skip_to_string_delim(quote);
            if b == quote {
                self.cursor.advance();
                return self.tok(RawTag::DateTimeString, start);
            }
            if b == b'\\' {
                // Backslash is not special in datetime strings
                self.cursor.advance();
                continue;
            }
            return self.tok(RawTag::UnterminatedString, start);
        }
    }

    // ─── Expression operators ──────────────────────────────────────

    /// Fuse a run of operator characters; a run of length 1 keeps its
    /// dedicated single-character tag.
    fn operator_run(&mut self, start: u32) -> RawToken {
        let first = self.cursor.current();
        self.cursor.eat_while(is_operator_char);
        if self.cursor.pos() - start == 1 {
            match single_tag(first) {
                Some(tag) => self.tok(tag, start),
                None => self.tok(RawTag::InvalidByte, start),
            }
        } else {
            self.tok(RawTag::ExpressionOperator, start)
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    /// Iterate in [`LexMode::Value`]; mode-sensitive callers drive
    /// [`next_token`](RawScanner::next_token) directly.
    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token(LexMode::Value);
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// Tokenize a whole source string in [`LexMode::Value`], excluding `Eof`.
pub fn tokenize(src: &str) -> Vec<RawToken> {
    RawScanner::new(src).collect()
}
