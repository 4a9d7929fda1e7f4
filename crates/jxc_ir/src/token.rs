//! Tokens and token kinds.
//!
//! [`TokenKind`] enumerates every lexical class in the format, including the
//! single-character punctuation used inside expressions. A [`Token`] pairs a
//! kind with its source span and the exact source substring; raw-heredoc
//! strings additionally carry their delimiter label in `tag`.

use std::borrow::Cow;
use std::fmt;

use crate::Span;

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Lexer error placeholder; the error detail lives in the lexer.
    Invalid,
    /// `# ...` to end of line.
    Comment,
    /// `\n` or `\r\n`.
    LineBreak,
    /// `[A-Za-z_$][A-Za-z_$0-9]*`.
    Identifier,
    True,
    False,
    Null,
    /// Any numeric literal, including `nan`, `inf`, `+inf`, `-inf`.
    Number,
    /// Quoted or raw-heredoc string. Raw strings set [`Token::tag`].
    String,
    /// `b64"..."` byte string.
    ByteString,
    /// `dt"..."` date or datetime string.
    DateTime,
    /// Extended identifier form permitted only in object-key position
    /// (`a.b`, `a.*.c`, `$icon`, `*`).
    ObjectKeyIdentifier,
    ExclamationPoint,
    Period,
    Comma,
    Colon,
    Semicolon,
    Equals,
    QuestionMark,
    AtSymbol,
    Pipe,
    Ampersand,
    Percent,
    Asterisk,
    Plus,
    Minus,
    Slash,
    Backslash,
    Caret,
    Tilde,
    Backtick,
    /// Multi-character operator run fused inside an expression (`||`, `==`, `->`).
    ExpressionOperator,
    BraceOpen,
    BraceClose,
    SquareBracketOpen,
    SquareBracketClose,
    AngleBracketOpen,
    AngleBracketClose,
    ParenOpen,
    ParenClose,
    EndOfStream,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Invalid => "invalid token",
            TokenKind::Comment => "comment",
            TokenKind::LineBreak => "line break",
            TokenKind::Identifier => "identifier",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::ByteString => "byte string",
            TokenKind::DateTime => "datetime",
            TokenKind::ObjectKeyIdentifier => "object key",
            TokenKind::ExclamationPoint => "`!`",
            TokenKind::Period => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Equals => "`=`",
            TokenKind::QuestionMark => "`?`",
            TokenKind::AtSymbol => "`@`",
            TokenKind::Pipe => "`|`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Percent => "`%`",
            TokenKind::Asterisk => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Slash => "`/`",
            TokenKind::Backslash => "`\\`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::Backtick => "`` ` ``",
            TokenKind::ExpressionOperator => "operator",
            TokenKind::BraceOpen => "`{`",
            TokenKind::BraceClose => "`}`",
            TokenKind::SquareBracketOpen => "`[`",
            TokenKind::SquareBracketClose => "`]`",
            TokenKind::AngleBracketOpen => "`<`",
            TokenKind::AngleBracketClose => "`>`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::EndOfStream => "end of stream",
        }
    }

    /// `true` for kinds that begin a bare (non-container) value.
    pub fn is_scalar_value(self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::ByteString
                | TokenKind::DateTime
        )
    }

    /// `true` for kinds valid in object-key position.
    pub fn is_object_key(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::ObjectKeyIdentifier
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One lexed token.
///
/// `value` is the exact source substring covered by `span` (including
/// quotes and prefixes for string forms). For raw-heredoc strings, `tag`
/// holds the delimiter label (`HEREDOC` in `r"HEREDOC(...)HEREDOC"`),
/// empty otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Span,
    pub value: Cow<'a, str>,
    pub tag: Cow<'a, str>,
}

impl<'a> Token<'a> {
    /// Create a token with no heredoc tag.
    pub fn new(kind: TokenKind, span: Span, value: impl Into<Cow<'a, str>>) -> Self {
        Token {
            kind,
            span,
            value: value.into(),
            tag: Cow::Borrowed(""),
        }
    }

    /// Create a token with a heredoc tag.
    pub fn with_tag(
        kind: TokenKind,
        span: Span,
        value: impl Into<Cow<'a, str>>,
        tag: impl Into<Cow<'a, str>>,
    ) -> Self {
        Token {
            kind,
            span,
            value: value.into(),
            tag: tag.into(),
        }
    }

    /// Detach the token from the source buffer.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            span: self.span,
            value: Cow::Owned(self.value.into_owned()),
            tag: Cow::Owned(self.tag.into_owned()),
        }
    }

    /// `true` when `value` holds owned storage (safe to retain after the
    /// source buffer is dropped).
    pub fn is_owned(&self) -> bool {
        matches!(self.value, Cow::Owned(_)) && matches!(self.tag, Cow::Owned(_))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(self.kind.description())
        } else {
            f.write_str(&self.value)
        }
    }
}

/// `true` if `val` is a plain identifier: `[A-Za-z_$][A-Za-z_$0-9]*`.
pub fn is_valid_identifier(val: &str) -> bool {
    let mut chars = val.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `true` if `val` is valid as an unquoted identifier inside an expression
/// (same as a plain identifier, minus `$`-free restrictions — kept separate
/// so the serializer can tighten either form independently).
pub fn is_valid_expression_identifier(val: &str) -> bool {
    is_valid_identifier(val)
}

/// `true` if `val` is valid as an unquoted object key.
///
/// Keys are one or more segments of `[A-Za-z_$*][A-Za-z_$*0-9]*` joined by
/// `.` or `-`: `a.b`, `a.*.c`, `$icon`, `font-size`.
pub fn is_valid_object_key_identifier(val: &str) -> bool {
    if val.is_empty() {
        return false;
    }
    let segment_ok = |seg: &str| {
        let mut chars = seg.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' || c == '*' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '*')
    };
    val.split(['.', '-']).all(segment_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_owned() {
        let tok = Token::new(TokenKind::Identifier, Span::new(0, 3), "abc");
        assert!(!tok.is_owned());
        let owned = tok.into_owned();
        assert!(owned.is_owned());
        assert_eq!(owned.value, "abc");
        assert_eq!(owned.span, Span::new(0, 3));
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("abc"));
        assert!(is_valid_identifier("_x1"));
        assert!(is_valid_identifier("$ref"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("a.b"));
        assert!(!is_valid_identifier("a b"));
    }

    #[test]
    fn object_key_validation() {
        assert!(is_valid_object_key_identifier("a"));
        assert!(is_valid_object_key_identifier("a.b"));
        assert!(is_valid_object_key_identifier("a.*.c"));
        assert!(is_valid_object_key_identifier("*"));
        assert!(is_valid_object_key_identifier("$$$***$$$"));
        assert!(is_valid_object_key_identifier("font-size"));
        assert!(!is_valid_object_key_identifier(""));
        assert!(!is_valid_object_key_identifier(".a"));
        assert!(!is_valid_object_key_identifier("a..b"));
        assert!(!is_valid_object_key_identifier("a-"));
        assert!(!is_valid_object_key_identifier("1a"));
    }

    #[test]
    fn key_kinds() {
        assert!(TokenKind::Identifier.is_object_key());
        assert!(TokenKind::ObjectKeyIdentifier.is_object_key());
        assert!(TokenKind::Number.is_object_key());
        assert!(TokenKind::Null.is_object_key());
        assert!(!TokenKind::SquareBracketOpen.is_object_key());
        assert!(!TokenKind::ByteString.is_object_key());
    }
}
