//! Elements — one step of the structural parse stream.
//!
//! The element parser turns the token stream into a flat sequence of
//! [`Element`]s: values, container openers/closers, object keys, expression
//! tokens, and comments. Consumers (the value constructor, custom decoders,
//! syntax highlighters) walk this stream instead of a tree.

use std::borrow::Cow;
use std::fmt;

use crate::{Span, Token};

/// Kind of one parse-stream element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A bare value: null, bool, number, string, bytes, or datetime.
    Value,
    BeginArray,
    EndArray,
    BeginObject,
    /// An object key; the value follows after the key separator.
    ObjectKey,
    EndObject,
    BeginExpression,
    /// One raw token inside an expression body.
    ExpressionToken,
    EndExpression,
    Comment,
}

impl ElementKind {
    /// `true` for elements that may carry an annotation: values and
    /// container openers. Keys and closers never do.
    pub fn can_have_annotation(self) -> bool {
        matches!(
            self,
            ElementKind::Value
                | ElementKind::BeginArray
                | ElementKind::BeginObject
                | ElementKind::BeginExpression
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Value => "value",
            ElementKind::BeginArray => "begin-array",
            ElementKind::EndArray => "end-array",
            ElementKind::BeginObject => "begin-object",
            ElementKind::ObjectKey => "object-key",
            ElementKind::EndObject => "end-object",
            ElementKind::BeginExpression => "begin-expression",
            ElementKind::ExpressionToken => "expression-token",
            ElementKind::EndExpression => "end-expression",
            ElementKind::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// An annotation attached to a value or container opener.
///
/// Holds the ordered token list (`Array`, `<`, `int`, `>`) and the exact
/// source substring (`Array<int>`). Empty for unannotated elements.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Annotation<'a> {
    tokens: Vec<Token<'a>>,
    source: Cow<'a, str>,
}

impl<'a> Annotation<'a> {
    /// Annotation with no tokens.
    pub fn empty() -> Self {
        Annotation::default()
    }

    /// Build from the captured token list and the covering source text.
    pub fn new(tokens: Vec<Token<'a>>, source: impl Into<Cow<'a, str>>) -> Self {
        Annotation {
            tokens,
            source: source.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// The exact source substring from the first to the last token, or
    /// `None` for an empty annotation.
    pub fn source(&self) -> Option<&str> {
        if self.is_empty() {
            None
        } else {
            Some(&self.source)
        }
    }

    /// Whitespace-insensitive form: token values concatenated with nothing
    /// between them, so `list<f32, 8>` and `list< f32 , 8 >` normalize to
    /// the same string. Used as the lookup key for annotation hooks.
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for tok in &self.tokens {
            out.push_str(&tok.value);
        }
        out
    }

    /// Source span covering the whole annotation.
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::INVALID,
        }
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> Annotation<'static> {
        Annotation {
            tokens: self.tokens.into_iter().map(Token::into_owned).collect(),
            source: Cow::Owned(self.source.into_owned()),
        }
    }
}

impl fmt::Display for Annotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source().unwrap_or(""))
    }
}

/// One step of the parse stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    pub kind: ElementKind,
    /// The token at the element's anchor position (the `[` for
    /// `BeginArray`, the key token for `ObjectKey`, and so on).
    pub token: Token<'a>,
    /// Annotation attached to this element; empty unless
    /// [`ElementKind::can_have_annotation`].
    pub annotation: Annotation<'a>,
}

impl<'a> Element<'a> {
    pub fn new(kind: ElementKind, token: Token<'a>) -> Self {
        Element {
            kind,
            token,
            annotation: Annotation::empty(),
        }
    }

    pub fn with_annotation(kind: ElementKind, token: Token<'a>, annotation: Annotation<'a>) -> Self {
        Element {
            kind,
            token,
            annotation,
        }
    }

    /// Source span of the anchor token.
    pub fn span(&self) -> Span {
        self.token.span
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> Element<'static> {
        Element {
            kind: self.kind,
            token: self.token.into_owned(),
            annotation: self.annotation.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    fn ident(value: &str, start: u32) -> Token<'_> {
        let end = start + value.len() as u32;
        Token::new(TokenKind::Identifier, Span::new(start, end), value)
    }

    fn punct(kind: TokenKind, value: &'static str, start: u32) -> Token<'static> {
        let end = start + value.len() as u32;
        Token::new(kind, Span::new(start, end), value)
    }

    #[test]
    fn annotation_normalization_ignores_whitespace() {
        // `list< f32 , 8 >` and `list<f32, 8>` normalize identically
        let spaced = Annotation::new(
            vec![
                ident("list", 0),
                punct(TokenKind::AngleBracketOpen, "<", 4),
                ident("f32", 6),
                punct(TokenKind::Comma, ",", 10),
                punct(TokenKind::Number, "8", 12),
                punct(TokenKind::AngleBracketClose, ">", 14),
            ],
            "list< f32 , 8 >",
        );
        assert_eq!(spaced.normalized(), "list<f32,8>");
        assert_eq!(spaced.source(), Some("list< f32 , 8 >"));
        assert_eq!(spaced.span(), Span::new(0, 15));
    }

    #[test]
    fn empty_annotation() {
        let anno = Annotation::empty();
        assert!(anno.is_empty());
        assert_eq!(anno.source(), None);
        assert!(anno.span().is_invalid());
    }

    #[test]
    fn annotation_placement_rules() {
        assert!(ElementKind::Value.can_have_annotation());
        assert!(ElementKind::BeginArray.can_have_annotation());
        assert!(ElementKind::BeginObject.can_have_annotation());
        assert!(ElementKind::BeginExpression.can_have_annotation());
        assert!(!ElementKind::ObjectKey.can_have_annotation());
        assert!(!ElementKind::EndArray.can_have_annotation());
        assert!(!ElementKind::EndObject.can_have_annotation());
        assert!(!ElementKind::EndExpression.can_have_annotation());
    }
}
