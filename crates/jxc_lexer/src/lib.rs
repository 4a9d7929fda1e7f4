//! Token cooking for JXC.
//!
//! [`Lexer`] drives the raw scanner from `jxc_lexer_core` and turns
//! `(tag, len)` pairs into typed [`Token`]s: keywords resolve to their
//! dedicated kinds, string escapes and numeric/datetime/base64 literals are
//! validated, and raw-heredoc strings get their delimiter label extracted
//! into [`Token::tag`]. The first error is sticky — every call after a
//! failure reports the same error.
//!
//! The value-level decoding functions ([`parse_string_token`],
//! [`parse_number_token`], [`parse_bytes_token`], [`parse_datetime_token`])
//! live in [`cooker`] and are shared by the value constructor and tests.

pub mod cooker;

pub use cooker::{
    parse_bytes_token, parse_datetime_token, parse_number_token, parse_string_token,
    DateTimeParsed, NumberValue,
};

use jxc_diagnostic::Error;
use jxc_ir::{Span, Token, TokenKind};
use jxc_lexer_core::{LexMode, RawScanner, RawTag, RawToken};

/// Streaming token producer.
///
/// The element parser switches [`LexMode`] per call from its own state;
/// standalone users get [`LexMode::Value`] by default.
pub struct Lexer<'a> {
    scanner: RawScanner<'a>,
    src: &'a str,
    mode: LexMode,
    /// First error encountered; sticky.
    error: Option<Error>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            scanner: RawScanner::new(src),
            src,
            mode: LexMode::Value,
            error: None,
        }
    }

    /// Source buffer this lexer reads from.
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Active sub-grammar for subsequent [`next_token`](Self::next_token) calls.
    pub fn set_mode(&mut self, mode: LexMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// The retained first error, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Produce the next token, skipping whitespace (but not line breaks or
    /// comments — separator handling is the parser's business).
    ///
    /// At end of input, returns an [`TokenKind::EndOfStream`] token
    /// repeatedly. After an error, keeps returning that error.
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        loop {
            let start = self.scanner.cursor().pos();
            let raw = self.scanner.next_token(self.mode);
            if raw.tag == RawTag::Whitespace {
                continue;
            }
            match self.cook(raw, start) {
                Ok(token) => return Ok(token),
                Err(err) => {
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
    }

    fn cook(&self, raw: RawToken, start: u32) -> Result<Token<'a>, Error> {
        let span = Span::new(start, start + raw.len);
        let text = self.scanner.cursor().slice(start, start + raw.len);

        let kind = match raw.tag {
            RawTag::Eof => {
                return Ok(Token::new(
                    TokenKind::EndOfStream,
                    Span::point(start),
                    "",
                ))
            }
            RawTag::Newline => TokenKind::LineBreak,
            RawTag::Comment => TokenKind::Comment,
            RawTag::Ident => match text {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                // Bare non-finite literals are numbers
                "nan" | "inf" => TokenKind::Number,
                _ => TokenKind::Identifier,
            },
            RawTag::ObjectKeyIdent => TokenKind::ObjectKeyIdentifier,
            RawTag::Number => {
                // Reject malformed literals (`-bogus`, exponent overflow)
                jxc_ir::split_number(text).map_err(|msg| Error::lex(msg, span))?;
                TokenKind::Number
            }
            RawTag::String => {
                // Validate escapes now so the failure points at the literal
                cooker::validate_quoted_string(text, start)?;
                TokenKind::String
            }
            RawTag::RawString => {
                let tag = cooker::raw_string_heredoc_tag(text, span)?;
                return Ok(Token::with_tag(TokenKind::String, span, text, tag));
            }
            RawTag::BytesString => {
                let token = Token::new(TokenKind::ByteString, span, text);
                cooker::parse_bytes_token(&token)?;
                TokenKind::ByteString
            }
            RawTag::DateTimeString => {
                let token = Token::new(TokenKind::DateTime, span, text);
                cooker::parse_datetime_token(&token)?;
                TokenKind::DateTime
            }
            RawTag::ExclamationPoint => TokenKind::ExclamationPoint,
            RawTag::Period => TokenKind::Period,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Colon => TokenKind::Colon,
            RawTag::Semicolon => TokenKind::Semicolon,
            RawTag::Equals => TokenKind::Equals,
            RawTag::QuestionMark => TokenKind::QuestionMark,
            RawTag::AtSymbol => TokenKind::AtSymbol,
            RawTag::Pipe => TokenKind::Pipe,
            RawTag::Ampersand => TokenKind::Ampersand,
            RawTag::Percent => TokenKind::Percent,
            RawTag::Asterisk => TokenKind::Asterisk,
            RawTag::Plus => TokenKind::Plus,
            RawTag::Minus => TokenKind::Minus,
            RawTag::Slash => TokenKind::Slash,
            RawTag::Backslash => TokenKind::Backslash,
            RawTag::Caret => TokenKind::Caret,
            RawTag::Tilde => TokenKind::Tilde,
            RawTag::Backtick => TokenKind::Backtick,
            RawTag::ExpressionOperator => TokenKind::ExpressionOperator,
            RawTag::BraceOpen => TokenKind::BraceOpen,
            RawTag::BraceClose => TokenKind::BraceClose,
            RawTag::SquareBracketOpen => TokenKind::SquareBracketOpen,
            RawTag::SquareBracketClose => TokenKind::SquareBracketClose,
            RawTag::AngleBracketOpen => TokenKind::AngleBracketOpen,
            RawTag::AngleBracketClose => TokenKind::AngleBracketClose,
            RawTag::ParenOpen => TokenKind::ParenOpen,
            RawTag::ParenClose => TokenKind::ParenClose,
            RawTag::Whitespace => unreachable!("whitespace is skipped before cooking"),
            RawTag::UnterminatedString => {
                return Err(Error::lex("unterminated string", span));
            }
            RawTag::MalformedRawString => {
                return Err(Error::lex(
                    "malformed raw string: expected `(` after heredoc tag (tags are at most 16 characters)",
                    span,
                ));
            }
            RawTag::InvalidByte => {
                return Err(Error::lex(
                    format!("unexpected character {text:?}"),
                    span,
                ));
            }
        };
        Ok(Token::new(kind, span, text))
    }
}

/// Lex a whole document in [`LexMode::Value`].
///
/// Comments and line breaks are included, so reconcatenating token values
/// with the original inter-token whitespace reproduces the input. Halts at
/// the first error.
pub fn lex(src: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        if tok.kind == TokenKind::EndOfStream {
            break;
        }
        tokens.push(tok);
    }
    Ok(tokens)
}

/// Lex a standalone annotation string into its token list.
///
/// Used to normalize hook registration keys: comments, line breaks, and
/// whitespace are dropped so `list<f32, 8>` and `list< f32 , 8 >` produce
/// the same token values.
pub fn lex_annotation(src: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        match tok.kind {
            TokenKind::EndOfStream => break,
            TokenKind::Comment | TokenKind::LineBreak => {}
            _ => tokens.push(tok),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_resolve() {
        assert_eq!(
            kinds("true false null nan inf"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::Number,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn values_carry_source_text() {
        let tokens = lex("vec3[1, 2.5px]").unwrap();
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_ref()).collect();
        assert_eq!(values, vec!["vec3", "[", "1", ",", "2.5px", "]"]);
        for tok in &tokens {
            assert_eq!(
                &"vec3[1, 2.5px]"[tok.span.to_range()],
                tok.value.as_ref(),
                "span must cover the token text"
            );
        }
    }

    #[test]
    fn heredoc_tag_extraction() {
        let tokens = lex(r#"r"HEREDOC(body)HEREDOC""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].tag, "HEREDOC");

        let tokens = lex(r#"r"(body)""#).unwrap();
        assert_eq!(tokens[0].tag, "");
    }

    #[test]
    fn sticky_error() {
        let mut lexer = Lexer::new("\"unterminated");
        let first = lexer.next_token().unwrap_err();
        let second = lexer.next_token().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(lexer.error(), Some(&first));
    }

    #[test]
    fn invalid_number_is_a_lex_error() {
        assert!(lex("-bogus").is_err());
        assert!(lex("1.5.5").is_ok()); // lexes as `1.5` `.` `5` (parser's problem)
    }

    #[test]
    fn invalid_escape_is_a_lex_error() {
        let err = lex(r#""a\qb""#).unwrap_err();
        assert_eq!(err.kind, jxc_diagnostic::ErrorKind::Lex);
        // The error span points at the escape, not the whole string
        assert_eq!(err.span().to_range(), 2..4);
    }

    #[test]
    fn invalid_datetime_is_a_lex_error() {
        assert!(lex("dt''").is_err());
        assert!(lex("dt'1-1-1'").is_err());
        assert!(lex("dt'2024-07-24'").is_ok());
    }

    #[test]
    fn annotation_lexing_normalizes_whitespace() {
        let spaced = lex_annotation("list< f32 , 8 >").unwrap();
        let tight = lex_annotation("list<f32,8>").unwrap();
        let spaced_values: Vec<&str> = spaced.iter().map(|t| t.value.as_ref()).collect();
        let tight_values: Vec<&str> = tight.iter().map(|t| t.value.as_ref()).collect();
        assert_eq!(spaced_values, tight_values);
        assert_eq!(spaced_values, vec!["list", "<", "f32", ",", "8", ">"]);
    }

    #[test]
    fn lex_preserves_input_with_whitespace_gaps() {
        let src = "vec3{ x: 1, # comment\n  y: 2 }";
        let tokens = lex(src).unwrap();
        // Re-concatenate token values with original inter-token whitespace
        let mut rebuilt = String::new();
        let mut pos = 0usize;
        for tok in &tokens {
            let range = tok.span.to_range();
            rebuilt.push_str(&src[pos..range.start]);
            rebuilt.push_str(&tok.value);
            pos = range.end;
        }
        rebuilt.push_str(&src[pos..]);
        assert_eq!(rebuilt, src);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Whenever arbitrary input lexes cleanly, re-concatenating the
            /// token values with the original inter-token whitespace
            /// reproduces the input byte-for-byte.
            #[test]
            fn reconcatenation_is_lossless(src in "\\PC*") {
                if let Ok(tokens) = lex(&src) {
                    let mut rebuilt = String::new();
                    let mut pos = 0usize;
                    for tok in &tokens {
                        let range = tok.span.to_range();
                        prop_assert!(range.start >= pos);
                        rebuilt.push_str(&src[pos..range.start]);
                        rebuilt.push_str(&tok.value);
                        pos = range.end;
                    }
                    rebuilt.push_str(&src[pos..]);
                    prop_assert_eq!(rebuilt, src);
                }
            }
        }
    }
}
