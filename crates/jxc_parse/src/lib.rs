//! Structural parser: token stream → element stream.
//!
//! [`ElementParser`] walks the cooked token stream and emits one
//! [`Element`] per logical position: values, container openers/closers,
//! object keys, expression tokens, and comments. A depth stack keeps
//! brackets, braces, parentheses, and annotation angle brackets nested
//! correctly; the lexer mode is switched per token from the parser's own
//! state (object-key grammar in key position, operator fusing inside
//! expressions).
//!
//! Commas are optional between peers when a line break separates them, and
//! trailing commas are permitted before any closer. Parsing halts at the
//! first error.

use jxc_diagnostic::Error;
use jxc_ir::{Annotation, Element, ElementKind, Token, TokenKind};
use jxc_lexer::Lexer;
use jxc_lexer_core::LexMode;
use tracing::trace;

/// Open container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    Array,
    Object,
    Expression,
}

/// What the parser expects at the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    /// A value (document root or after `:`).
    Value,
    /// A value or the closing `]` (array start, or after a comma).
    ValueOrClose,
    /// An object key or the closing `}`.
    KeyOrClose,
    /// The `:` after an object key.
    Colon,
    /// `,`, a line break, or the closer, after a value inside a container.
    SepOrClose,
    /// Nothing but trivia after the document root.
    End,
}

/// Streaming element parser.
///
/// Iterate it (or call [`next_element`](Self::next_element)) to pull
/// elements; the stream ends after the document root closes, and the first
/// error is terminal.
pub struct ElementParser<'a> {
    lexer: Lexer<'a>,
    src: &'a str,
    stack: Vec<Frame>,
    expect: Expect,
    /// Nested paren depth inside the current expression body.
    expr_depth: u32,
    /// A line break was seen where a separator may go; the next peer may
    /// start without a comma.
    newline_sep: bool,
    failed: bool,
    done: bool,
}

impl<'a> ElementParser<'a> {
    pub fn new(src: &'a str) -> Self {
        ElementParser {
            lexer: Lexer::new(src),
            src,
            stack: Vec::new(),
            expect: Expect::Value,
            expr_depth: 0,
            newline_sep: false,
            failed: false,
            done: false,
        }
    }

    /// Source buffer this parser reads from.
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Pull the next element. `None` after the stream ends or fails.
    pub fn next_element(&mut self) -> Option<Result<Element<'a>, Error>> {
        if self.failed || self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(element)) => {
                trace!(kind = %element.kind, "element");
                Some(Ok(element))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn advance(&mut self) -> Result<Option<Element<'a>>, Error> {
        loop {
            // Expression bodies are verbatim token streams
            if self.stack.last() == Some(&Frame::Expression) {
                return self.expression_token().map(Some);
            }

            self.lexer.set_mode(match self.expect {
                Expect::KeyOrClose => LexMode::ObjectKey,
                Expect::SepOrClose
                    if self.newline_sep && self.stack.last() == Some(&Frame::Object) =>
                {
                    LexMode::ObjectKey
                }
                _ => LexMode::Value,
            });
            let tok = self.lexer.next_token()?;

            match tok.kind {
                TokenKind::Comment => {
                    return Ok(Some(Element::new(ElementKind::Comment, tok)));
                }
                TokenKind::LineBreak => {
                    // A line break can stand in for the comma between peers
                    if self.expect == Expect::SepOrClose {
                        self.newline_sep = true;
                    }
                    continue;
                }
                TokenKind::EndOfStream => {
                    return if self.expect == Expect::End {
                        Ok(None)
                    } else if self.stack.is_empty() {
                        Err(Error::structure("unexpected end of stream", tok.span))
                    } else {
                        let what = match self.stack.last() {
                            Some(Frame::Array) => "unterminated array",
                            Some(Frame::Object) => "unterminated object",
                            _ => "unterminated expression",
                        };
                        Err(Error::structure(what, tok.span))
                    };
                }
                _ => {}
            }

            match self.expect {
                Expect::Value | Expect::ValueOrClose => {
                    return self.value_position(tok).map(Some);
                }
                Expect::KeyOrClose => return self.key_position(tok).map(Some),
                Expect::Colon => {
                    if tok.kind == TokenKind::Colon {
                        self.expect = Expect::Value;
                        continue;
                    }
                    return Err(Error::structure(
                        format!("expected `:` after object key, found {}", tok.kind),
                        tok.span,
                    ));
                }
                Expect::SepOrClose => {
                    let newline_sep = std::mem::take(&mut self.newline_sep);
                    let is_separator_or_closer = matches!(
                        tok.kind,
                        TokenKind::Comma
                            | TokenKind::SquareBracketClose
                            | TokenKind::BraceClose
                            | TokenKind::ParenClose
                    );
                    if newline_sep && !is_separator_or_closer {
                        // The line break was the separator; this token
                        // starts the next peer
                        match self.stack.last() {
                            Some(Frame::Array) => {
                                self.expect = Expect::ValueOrClose;
                                return self.value_position(tok).map(Some);
                            }
                            Some(Frame::Object) => {
                                self.expect = Expect::KeyOrClose;
                                return self.key_position(tok).map(Some);
                            }
                            _ => {}
                        }
                    }
                    if let Some(element) = self.separator_position(tok)? {
                        return Ok(Some(element));
                    }
                    continue;
                }
                Expect::End => {
                    return Err(Error::structure(
                        format!("unexpected {} after document root", tok.kind),
                        tok.span,
                    ));
                }
            }
        }
    }

    /// One token of an expression body, or its closing paren.
    fn expression_token(&mut self) -> Result<Element<'a>, Error> {
        self.lexer.set_mode(LexMode::Expression);
        let tok = self.lexer.next_token()?;
        match tok.kind {
            TokenKind::ParenClose if self.expr_depth == 0 => {
                self.stack.pop();
                self.value_finished();
                trace!("end expression");
                Ok(Element::new(ElementKind::EndExpression, tok))
            }
            TokenKind::ParenClose => {
                self.expr_depth -= 1;
                Ok(Element::new(ElementKind::ExpressionToken, tok))
            }
            TokenKind::ParenOpen => {
                self.expr_depth += 1;
                Ok(Element::new(ElementKind::ExpressionToken, tok))
            }
            TokenKind::EndOfStream => {
                Err(Error::structure("unterminated expression", tok.span))
            }
            _ => Ok(Element::new(ElementKind::ExpressionToken, tok)),
        }
    }

    /// After a complete value: what comes next depends on the container.
    fn value_finished(&mut self) {
        self.expect = match self.stack.last() {
            None => Expect::End,
            Some(Frame::Array | Frame::Object) => Expect::SepOrClose,
            Some(Frame::Expression) => Expect::SepOrClose, // unreachable in practice
        };
    }

    fn value_position(&mut self, tok: Token<'a>) -> Result<Element<'a>, Error> {
        let mut tok = tok;
        let mut annotation = Annotation::empty();

        if matches!(
            tok.kind,
            TokenKind::Identifier | TokenKind::ExclamationPoint
        ) {
            let (anno, next) = self.parse_annotation(tok)?;
            annotation = anno;
            tok = next;
        }

        match tok.kind {
            k if k.is_scalar_value() => {
                self.value_finished();
                Ok(Element::with_annotation(ElementKind::Value, tok, annotation))
            }
            TokenKind::SquareBracketOpen => {
                self.stack.push(Frame::Array);
                self.expect = Expect::ValueOrClose;
                trace!("begin array");
                Ok(Element::with_annotation(
                    ElementKind::BeginArray,
                    tok,
                    annotation,
                ))
            }
            TokenKind::BraceOpen => {
                self.stack.push(Frame::Object);
                self.expect = Expect::KeyOrClose;
                trace!("begin object");
                Ok(Element::with_annotation(
                    ElementKind::BeginObject,
                    tok,
                    annotation,
                ))
            }
            TokenKind::ParenOpen => {
                self.stack.push(Frame::Expression);
                self.expr_depth = 0;
                trace!("begin expression");
                Ok(Element::with_annotation(
                    ElementKind::BeginExpression,
                    tok,
                    annotation,
                ))
            }
            TokenKind::SquareBracketClose
                if annotation.is_empty() && self.expect == Expect::ValueOrClose =>
            {
                // Empty array or trailing comma
                self.stack.pop();
                self.value_finished();
                trace!("end array");
                Ok(Element::new(ElementKind::EndArray, tok))
            }
            _ if !annotation.is_empty() => Err(Error::structure(
                format!(
                    "expected a value after annotation, found {}",
                    tok.kind
                ),
                tok.span,
            )),
            _ => Err(Error::structure(
                format!("expected a value, found {}", tok.kind),
                tok.span,
            )),
        }
    }

    fn key_position(&mut self, tok: Token<'a>) -> Result<Element<'a>, Error> {
        match tok.kind {
            TokenKind::BraceClose => {
                self.stack.pop();
                self.value_finished();
                trace!("end object");
                Ok(Element::new(ElementKind::EndObject, tok))
            }
            TokenKind::Number => {
                // Only bare signed integers work as keys
                let split = jxc_ir::split_number(&tok.value)
                    .map_err(|msg| Error::lex(msg, tok.span))?;
                let integral = split.kind == jxc_ir::FloatLiteralKind::Finite
                    && split.frac_digits.is_empty()
                    && split.exp.is_empty()
                    && split.suffix.is_empty();
                if !integral {
                    return Err(Error::structure(
                        format!("object key must be an integer literal, found `{}`", tok.value),
                        tok.span,
                    ));
                }
                self.expect = Expect::Colon;
                Ok(Element::new(ElementKind::ObjectKey, tok))
            }
            k if k.is_object_key() => {
                self.expect = Expect::Colon;
                Ok(Element::new(ElementKind::ObjectKey, tok))
            }
            TokenKind::ExclamationPoint | TokenKind::AngleBracketOpen => Err(Error::structure(
                "annotations are not permitted on object keys",
                tok.span,
            )),
            _ => Err(Error::structure(
                format!("expected object key, found {}", tok.kind),
                tok.span,
            )),
        }
    }

    /// Between peers inside a container. `None` means "separator consumed,
    /// keep scanning".
    fn separator_position(&mut self, tok: Token<'a>) -> Result<Option<Element<'a>>, Error> {
        match (tok.kind, self.stack.last()) {
            (TokenKind::Comma, Some(Frame::Array)) => {
                self.expect = Expect::ValueOrClose;
                Ok(None)
            }
            (TokenKind::Comma, Some(Frame::Object)) => {
                self.expect = Expect::KeyOrClose;
                Ok(None)
            }
            (TokenKind::SquareBracketClose, Some(Frame::Array)) => {
                self.stack.pop();
                self.value_finished();
                trace!("end array");
                Ok(Some(Element::new(ElementKind::EndArray, tok)))
            }
            (TokenKind::BraceClose, Some(Frame::Object)) => {
                self.stack.pop();
                self.value_finished();
                trace!("end object");
                Ok(Some(Element::new(ElementKind::EndObject, tok)))
            }
            (TokenKind::SquareBracketClose | TokenKind::BraceClose | TokenKind::ParenClose, _) => {
                Err(Error::structure(
                    format!("mismatched closer {}", tok.kind),
                    tok.span,
                ))
            }
            _ => Err(Error::structure(
                format!("expected `,` or closer, found {}", tok.kind),
                tok.span,
            )),
        }
    }

    /// Accumulate an annotation starting at `first` (an identifier or `!`).
    ///
    /// Grammar: `!`? identifier (`.` identifier)* (`<` balanced tokens `>`)?
    /// Returns the annotation and the first token after it (trivia after the
    /// annotation is skipped).
    fn parse_annotation(
        &mut self,
        first: Token<'a>,
    ) -> Result<(Annotation<'a>, Token<'a>), Error> {
        let anno_start = first.span.start;
        let mut tokens = Vec::new();
        let mut tok = first;

        if tok.kind == TokenKind::ExclamationPoint {
            tokens.push(tok);
            tok = self.lexer.next_token()?;
            if tok.kind != TokenKind::Identifier {
                return Err(Error::annotation(
                    format!("expected identifier after `!`, found {}", tok.kind),
                    tok.span,
                ));
            }
        }

        let mut last_end = tok.span.end;
        tokens.push(tok);
        let mut next = self.lexer.next_token()?;

        // Dotted path: `a.b.c`
        while next.kind == TokenKind::Period {
            let ident = self.lexer.next_token()?;
            if ident.kind != TokenKind::Identifier {
                return Err(Error::annotation(
                    format!("expected identifier after `.`, found {}", ident.kind),
                    ident.span,
                ));
            }
            last_end = ident.span.end;
            tokens.push(next);
            tokens.push(ident);
            next = self.lexer.next_token()?;
        }

        // Balanced parameter list: `<` ... `>`
        if next.kind == TokenKind::AngleBracketOpen {
            tokens.push(next);
            let mut depth = 1u32;
            loop {
                let t = self.lexer.next_token()?;
                match t.kind {
                    TokenKind::AngleBracketOpen => depth += 1,
                    TokenKind::AngleBracketClose => {
                        depth -= 1;
                        if depth == 0 {
                            last_end = t.span.end;
                            tokens.push(t);
                            break;
                        }
                    }
                    TokenKind::EndOfStream => {
                        return Err(Error::annotation(
                            "unterminated annotation parameter list",
                            t.span,
                        ));
                    }
                    // Whitespace-insensitive matching: trivia stays out of
                    // the token list (the source substring still covers it)
                    TokenKind::LineBreak | TokenKind::Comment => continue,
                    _ => {}
                }
                tokens.push(t);
            }
            next = self.lexer.next_token()?;
        }

        // The value may sit on the next line
        while matches!(next.kind, TokenKind::LineBreak | TokenKind::Comment) {
            next = self.lexer.next_token()?;
        }

        let source = self
            .src
            .get(anno_start as usize..last_end as usize)
            .unwrap_or("");
        Ok((Annotation::new(tokens, source), next))
    }
}

impl<'a> Iterator for ElementParser<'a> {
    type Item = Result<Element<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element()
    }
}

/// Parse a whole document into its element sequence. Halts at the first
/// error.
pub fn elements(src: &str) -> Result<Vec<Element<'_>>, Error> {
    ElementParser::new(src).collect()
}
