//! Raw token tags for the low-level tokenizer.
//!
//! `RawTag` is the standalone token kind produced by the raw scanner. It
//! maps onto `jxc_ir::TokenKind` in the cooking layer (`jxc_lexer`); error
//! conditions are encoded as tags, not as `Result::Err`, so the scanner
//! itself stays infallible and allocation-free.

/// Raw token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Trivia ===
    /// Run of spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    /// `#` to end of line.
    Comment,

    // === Identifiers & literals ===
    /// `[A-Za-z_$][A-Za-z_$0-9]*` (keywords resolved in the cooking layer).
    Ident,
    /// Object-key identifier with `*` or dotted/dashed segments.
    ObjectKeyIdent,
    /// Any numeric literal, including signed `inf`/`nan` words.
    Number,
    /// `"..."` or `'...'`.
    String,
    /// `r"TAG(...)TAG"`.
    RawString,
    /// `b64"..."`.
    BytesString,
    /// `dt"..."`.
    DateTimeString,

    // === Punctuation ===
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
    /// Fused multi-character operator run (expression mode only).
    ExpressionOperator,
    BraceOpen,
    BraceClose,
    SquareBracketOpen,
    SquareBracketClose,
    AngleBracketOpen,
    AngleBracketClose,
    ParenOpen,
    ParenClose,

    // === Errors ===
    /// String/bytes/datetime literal with no closing quote (or a raw string
    /// with no `)TAG"` terminator).
    UnterminatedString,
    /// Raw string whose heredoc tag is too long or malformed.
    MalformedRawString,
    /// Byte that starts no token.
    InvalidByte,

    /// End of input; `len == 0`.
    Eof,
}

impl RawTag {
    /// `true` for the error tags.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            RawTag::UnterminatedString | RawTag::MalformedRawString | RawTag::InvalidByte
        )
    }

    /// `true` for whitespace/newline/comment.
    pub fn is_trivia(self) -> bool {
        matches!(self, RawTag::Whitespace | RawTag::Newline | RawTag::Comment)
    }
}

/// One raw token: a tag and the byte length it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

/// Active sub-grammar for one `next_token` call.
///
/// The element parser selects the mode from its state: `ObjectKey` when a
/// key is expected, `Expression` inside parentheses, `Value` otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Default grammar: signed numbers, `<`/`>` as angle brackets.
    #[default]
    Value,
    /// Operator runs fuse into [`RawTag::ExpressionOperator`]; `+`/`-` are
    /// operators, never number signs.
    Expression,
    /// Identifiers admit `*` and `.`/`-` joined segments.
    ObjectKey,
}
