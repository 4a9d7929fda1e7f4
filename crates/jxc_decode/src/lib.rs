//! Value constructor: element stream + user policy → [`Value`] tree.
//!
//! [`Parser`] drives the element stream from `jxc_parse` against a
//! user-supplied policy:
//!
//! - **Annotation hooks** map an annotation's token text to a constructor
//!   that receives the parsed value (whole, as positional args from an
//!   array, or as keyword args from an object).
//! - **Number-suffix hooks** map a unit suffix to a constructor receiving
//!   the raw number.
//! - **Per-element overrides** intercept any [`ElementKind`] and may call
//!   back into [`Parser::parse_value`] and friends to pull further
//!   elements.
//! - A [`ClassRegistry`] resolves annotations to registered class decoders
//!   when the hook table misses.
//!
//! Values returned by [`Parser::parse`] are fully owned — they outlive the
//! input buffer.

mod registry;

pub use registry::{ClassDecoder, ClassRegistry};

use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use jxc_diagnostic::Error;
use jxc_ir::{
    Annotation, Element, ElementKind, ExpressionBody, Object, Span, Token, TokenKind, Value,
    ValueKind,
};
use jxc_lexer::{
    lex_annotation, parse_bytes_token, parse_datetime_token, parse_number_token,
    parse_string_token, DateTimeParsed, NumberValue,
};
use jxc_parse::ElementParser;

/// A fully-owned value, detached from any source buffer.
pub type OwnedValue = Value<'static>;

/// How expression bodies are materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExprParseMode {
    /// Each expression token coerced to a primitive value.
    #[default]
    ValueList,
    /// The raw token list, verbatim.
    TokenList,
    /// The original substring between the parentheses.
    SourceString,
}

/// Disposition of duplicate object keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectPolicy {
    /// Later pairs replace earlier ones (insertion position kept).
    #[default]
    LastWins,
    /// Every pair is preserved in source order.
    KeepDuplicates,
}

/// Immutable parse configuration.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    pub default_expr_parse_mode: ExprParseMode,
    /// When `true` (default), an annotation with no registered constructor
    /// is attached to the value as metadata; when `false`, it is an error.
    pub ignore_unknown_annotations: bool,
    /// When `true` (default), a number suffix with no registered
    /// constructor is attached to the value as metadata; when `false`, it
    /// is an error.
    pub ignore_unknown_number_suffixes: bool,
    pub object_policy: ObjectPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_expr_parse_mode: ExprParseMode::ValueList,
            ignore_unknown_annotations: true,
            ignore_unknown_number_suffixes: true,
            object_policy: ObjectPolicy::LastWins,
        }
    }
}

/// Constructor receiving the parsed value whole.
pub type ValueConstructorFn = Rc<dyn Fn(OwnedValue) -> Result<OwnedValue, String>>;
/// Constructor receiving an array's items as positional arguments.
pub type ArgsConstructorFn = Rc<dyn Fn(Vec<OwnedValue>) -> Result<OwnedValue, String>>;
/// Constructor receiving an object's pairs as keyword arguments.
pub type KwargsConstructorFn = Rc<dyn Fn(Vec<(String, OwnedValue)>) -> Result<OwnedValue, String>>;

/// A registered annotation constructor and how the value is flattened
/// before the call.
#[derive(Clone)]
pub enum AnnotationConstructor {
    /// Pass the parsed value as-is.
    Value(ValueConstructorFn),
    /// The value must be an array; its items become the arguments.
    ListAsArgs(ArgsConstructorFn),
    /// The value must be an object; its pairs become keyword arguments.
    DictAsKeywordArgs(KwargsConstructorFn),
}

impl AnnotationConstructor {
    pub fn value(f: impl Fn(OwnedValue) -> Result<OwnedValue, String> + 'static) -> Self {
        AnnotationConstructor::Value(Rc::new(f))
    }

    pub fn list_as_args(
        f: impl Fn(Vec<OwnedValue>) -> Result<OwnedValue, String> + 'static,
    ) -> Self {
        AnnotationConstructor::ListAsArgs(Rc::new(f))
    }

    pub fn dict_as_keyword_args(
        f: impl Fn(Vec<(String, OwnedValue)>) -> Result<OwnedValue, String> + 'static,
    ) -> Self {
        AnnotationConstructor::DictAsKeywordArgs(Rc::new(f))
    }
}

/// Constructor applied to a number carrying a registered suffix.
pub type SuffixConstructorFn = Rc<dyn Fn(OwnedValue) -> Result<OwnedValue, String>>;

/// Fallback annotation resolver, consulted when the exact hook table
/// misses. Receives the annotated element.
pub type AnnotationResolverFn = Rc<dyn Fn(&Element<'_>) -> Option<AnnotationConstructor>>;

/// Per-element override. May call back into the parser's public operations
/// to pull further elements.
pub type ElementOverrideFn<'a> =
    Rc<dyn Fn(&mut Parser<'a>, &Element<'a>) -> Result<OwnedValue, Error> + 'a>;

enum Resolved {
    Hook(AnnotationConstructor),
    Class(Arc<ClassDecoder>),
}

/// The value constructor.
pub struct Parser<'a> {
    elements: ElementParser<'a>,
    src: &'a str,
    options: ParseOptions,
    annotation_hooks: FxHashMap<String, AnnotationConstructor>,
    annotation_resolver: Option<AnnotationResolverFn>,
    suffix_hooks: FxHashMap<String, SuffixConstructorFn>,
    overrides: FxHashMap<ElementKind, ElementOverrideFn<'a>>,
    registry: Option<Arc<ClassRegistry>>,
    current: Option<Element<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser::with_options(src, ParseOptions::default())
    }

    pub fn with_options(src: &'a str, options: ParseOptions) -> Self {
        Parser {
            elements: ElementParser::new(src),
            src,
            options,
            annotation_hooks: FxHashMap::default(),
            annotation_resolver: None,
            suffix_hooks: FxHashMap::default(),
            overrides: FxHashMap::default(),
            registry: None,
            current: None,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Register a constructor for an annotation.
    ///
    /// `annotation` is lexed and matched whitespace-insensitively, so
    /// `"list<f32, 8>"` and `"list< f32 , 8 >"` register the same key.
    pub fn set_annotation_constructor(
        &mut self,
        annotation: &str,
        constructor: AnnotationConstructor,
    ) -> Result<(), Error> {
        let tokens = lex_annotation(annotation)?;
        let key: String = tokens.iter().map(|t| t.value.as_ref()).collect();
        self.annotation_hooks.insert(key, constructor);
        Ok(())
    }

    /// Fallback resolver consulted when no exact annotation hook matches.
    pub fn set_annotation_resolver(&mut self, resolver: AnnotationResolverFn) {
        self.annotation_resolver = Some(resolver);
    }

    /// Register a constructor for a numeric unit suffix (`"px"`, `"%"`).
    pub fn set_number_suffix_constructor(
        &mut self,
        suffix: &str,
        constructor: SuffixConstructorFn,
    ) {
        self.suffix_hooks.insert(suffix.to_string(), constructor);
    }

    /// Intercept every element of the given kind.
    pub fn set_element_override(&mut self, kind: ElementKind, f: ElementOverrideFn<'a>) {
        self.overrides.insert(kind, f);
    }

    /// Resolve annotations through a shared class-decoder registry after
    /// the hook table misses.
    pub fn set_class_registry(&mut self, registry: Arc<ClassRegistry>) {
        self.registry = Some(registry);
    }

    /// Parse the document and return its root value.
    pub fn parse(&mut self) -> Result<OwnedValue, Error> {
        debug!("parse start");
        self.advance()?;
        let value = self.parse_value()?;
        self.advance()?;
        if let Some(extra) = &self.current {
            return Err(Error::structure(
                format!("unexpected {} after document root", extra.kind),
                extra.span(),
            ));
        }
        Ok(value)
    }

    // ─── Public stream operations (also used by overrides) ─────────

    /// Pull the next non-comment element into [`current_element`](Self::current_element).
    pub fn advance(&mut self) -> Result<(), Error> {
        loop {
            match self.elements.next_element() {
                Some(Ok(e)) if e.kind == ElementKind::Comment => {}
                Some(Ok(e)) => {
                    self.current = Some(e);
                    return Ok(());
                }
                Some(Err(err)) => {
                    self.current = None;
                    return Err(err);
                }
                None => {
                    self.current = None;
                    return Ok(());
                }
            }
        }
    }

    /// The element the next `parse_*` call will consume.
    pub fn current_element(&self) -> Option<&Element<'a>> {
        self.current.as_ref()
    }

    /// Parse the value starting at the current element, consuming through
    /// its end. Leaves the element *after* the value current.
    pub fn parse_value(&mut self) -> Result<OwnedValue, Error> {
        let Some(element) = self.current.clone() else {
            return Err(Error::structure(
                "expected a value, found end of stream",
                Span::INVALID,
            ));
        };

        if let Some(f) = self.overrides.get(&element.kind).cloned() {
            return f(self, &element);
        }

        // Resolve the annotation before consuming the value so unknown
        // annotations fail fast in strict mode
        let mut pending: Option<Resolved> = None;
        if !element.annotation.is_empty() {
            pending = self.resolve_annotation(&element);
            if pending.is_none() && !self.options.ignore_unknown_annotations {
                return Err(Error::annotation(
                    format!(
                        "unknown annotation `{}`",
                        element.annotation.source().unwrap_or("")
                    ),
                    element.annotation.span(),
                ));
            }
        }

        let value = match element.kind {
            ElementKind::Value => {
                let v = self.decode_scalar(&element)?;
                self.advance()?;
                v
            }
            ElementKind::BeginArray => self.parse_array()?,
            ElementKind::BeginObject => self.parse_object()?,
            ElementKind::BeginExpression => self.parse_expression()?,
            other => {
                return Err(Error::structure(
                    format!("expected a value, found {other}"),
                    element.span(),
                ));
            }
        };

        match pending {
            Some(resolved) => {
                apply_constructor(resolved, value, &element.annotation, element.span())
            }
            None if !element.annotation.is_empty() => {
                Ok(value.with_annotation(element.annotation.clone().into_owned()))
            }
            None => Ok(value),
        }
    }

    /// Parse an array starting at the current `BeginArray` element.
    pub fn parse_array(&mut self) -> Result<OwnedValue, Error> {
        match self.current_element() {
            Some(e) if e.kind == ElementKind::BeginArray => {}
            other => {
                let span = other.map_or(Span::INVALID, Element::span);
                return Err(Error::structure("expected `[`", span));
            }
        }
        self.advance()?;
        let mut items = Vec::new();
        loop {
            match self.current.as_ref().map(|e| e.kind) {
                Some(ElementKind::EndArray) => {
                    self.advance()?;
                    return Ok(Value::new(ValueKind::Array(items)));
                }
                Some(_) => items.push(self.parse_value()?),
                None => {
                    return Err(Error::structure("unterminated array", Span::INVALID));
                }
            }
        }
    }

    /// Parse an object starting at the current `BeginObject` element.
    pub fn parse_object(&mut self) -> Result<OwnedValue, Error> {
        match self.current_element() {
            Some(e) if e.kind == ElementKind::BeginObject => {}
            other => {
                let span = other.map_or(Span::INVALID, Element::span);
                return Err(Error::structure("expected `{`", span));
            }
        }
        self.advance()?;
        let mut object = match self.options.object_policy {
            ObjectPolicy::LastWins => Object::new(),
            ObjectPolicy::KeepDuplicates => Object::new_multi(),
        };
        loop {
            match self.current.as_ref().map(|e| e.kind) {
                Some(ElementKind::EndObject) => {
                    self.advance()?;
                    return Ok(Value::new(ValueKind::Object(object)));
                }
                Some(ElementKind::ObjectKey) => {
                    let key = match self.current.as_ref() {
                        Some(e) => decode_key(e)?,
                        None => return Err(Error::structure("expected object key", Span::INVALID)),
                    };
                    self.advance()?;
                    let value = self.parse_value()?;
                    object.insert(key, value);
                }
                Some(other) => {
                    let span = self.current.as_ref().map_or(Span::INVALID, Element::span);
                    return Err(Error::structure(
                        format!("expected object key, found {other}"),
                        span,
                    ));
                }
                None => {
                    return Err(Error::structure("unterminated object", Span::INVALID));
                }
            }
        }
    }

    /// Parse an expression starting at the current `BeginExpression`
    /// element, materialized per the configured mode.
    pub fn parse_expression(&mut self) -> Result<OwnedValue, Error> {
        let open_span = match self.current_element() {
            Some(e) if e.kind == ElementKind::BeginExpression => e.span(),
            other => {
                let span = other.map_or(Span::INVALID, Element::span);
                return Err(Error::structure("expected `(`", span));
            }
        };
        self.advance()?;
        let mut tokens: Vec<Token<'a>> = Vec::new();
        let close_span;
        loop {
            match self.current.as_ref().map(|e| e.kind) {
                Some(ElementKind::EndExpression) => {
                    close_span = self.current.as_ref().map_or(Span::INVALID, Element::span);
                    self.advance()?;
                    break;
                }
                Some(ElementKind::ExpressionToken) => {
                    if let Some(token) = self.current.as_ref().map(|e| e.token.clone()) {
                        tokens.push(token);
                    }
                    self.advance()?;
                }
                Some(other) => {
                    let span = self.current.as_ref().map_or(Span::INVALID, Element::span);
                    return Err(Error::structure(
                        format!("expected expression token, found {other}"),
                        span,
                    ));
                }
                None => {
                    return Err(Error::structure("unterminated expression", Span::INVALID));
                }
            }
        }

        let body = match self.options.default_expr_parse_mode {
            ExprParseMode::TokenList => {
                ExpressionBody::Tokens(tokens.into_iter().map(Token::into_owned).collect())
            }
            ExprParseMode::SourceString => {
                let src = self
                    .src
                    .get(open_span.end as usize..close_span.start as usize)
                    .unwrap_or("");
                ExpressionBody::Source(src.to_string().into())
            }
            ExprParseMode::ValueList => ExpressionBody::Values(self.expression_values(&tokens)?),
        };
        Ok(Value::new(ValueKind::Expression(body)))
    }

    // ─── Decoding helpers ──────────────────────────────────────────

    fn decode_scalar(&self, element: &Element<'a>) -> Result<OwnedValue, Error> {
        let token = &element.token;
        match token.kind {
            TokenKind::Null => Ok(Value::null()),
            TokenKind::True => Ok(Value::from(true)),
            TokenKind::False => Ok(Value::from(false)),
            TokenKind::Number => self.decode_number(token),
            TokenKind::String => {
                let content = parse_string_token(token)?;
                Ok(Value::from(content.into_owned()))
            }
            TokenKind::ByteString => Ok(Value::from(parse_bytes_token(token)?)),
            TokenKind::DateTime => Ok(match parse_datetime_token(token)? {
                DateTimeParsed::Date(date) => Value::from(date),
                DateTimeParsed::DateTime(dt) => Value::from(dt),
            }),
            other => Err(Error::structure(
                format!("token {other} is not a value"),
                token.span,
            )),
        }
    }

    fn decode_number(&self, token: &Token<'a>) -> Result<OwnedValue, Error> {
        let (number, suffix) = parse_number_token(token)?;
        let value = match number {
            NumberValue::Int(v) => Value::from(v),
            NumberValue::UInt(v) => Value::from(v),
            NumberValue::Float(v) => Value::from(v),
        };
        if suffix.is_empty() {
            return Ok(value);
        }
        if let Some(hook) = self.suffix_hooks.get(suffix).cloned() {
            return hook(value).map_err(|msg| {
                Error::constructor(
                    format!("number suffix constructor `{suffix}` failed: {msg}"),
                    token.span,
                )
            });
        }
        if self.options.ignore_unknown_number_suffixes {
            Ok(value.with_suffix(suffix.to_string()))
        } else {
            Err(Error::suffix(
                format!("unknown number suffix `{suffix}`"),
                token.span,
            ))
        }
    }

    /// ValueList coercion: value tokens decode to primitives; identifiers
    /// and punctuation become strings; fused operators contribute one
    /// string per character; trivia is dropped.
    fn expression_values(&self, tokens: &[Token<'a>]) -> Result<Vec<OwnedValue>, Error> {
        let mut values = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.kind {
                TokenKind::LineBreak | TokenKind::Comment => {}
                TokenKind::Null => values.push(Value::null()),
                TokenKind::True => values.push(Value::from(true)),
                TokenKind::False => values.push(Value::from(false)),
                TokenKind::Number => values.push(self.decode_number(token)?),
                TokenKind::String => {
                    values.push(Value::from(parse_string_token(token)?.into_owned()));
                }
                TokenKind::ByteString => values.push(Value::from(parse_bytes_token(token)?)),
                TokenKind::DateTime => values.push(match parse_datetime_token(token)? {
                    DateTimeParsed::Date(date) => Value::from(date),
                    DateTimeParsed::DateTime(dt) => Value::from(dt),
                }),
                TokenKind::ExpressionOperator => {
                    for ch in token.value.chars() {
                        values.push(Value::from(ch.to_string()));
                    }
                }
                _ => values.push(Value::from(token.value.clone().into_owned())),
            }
        }
        Ok(values)
    }

    fn resolve_annotation(&self, element: &Element<'a>) -> Option<Resolved> {
        let key = element.annotation.normalized();
        if let Some(hook) = self.annotation_hooks.get(&key) {
            debug!(annotation = %key, "annotation hook");
            return Some(Resolved::Hook(hook.clone()));
        }
        if let Some(resolver) = &self.annotation_resolver {
            if let Some(hook) = resolver(element) {
                return Some(Resolved::Hook(hook));
            }
        }
        if let Some(registry) = &self.registry {
            if let Some(decoder) = registry.resolve(element.annotation.source().unwrap_or("")) {
                debug!(annotation = %key, "class decoder");
                return Some(Resolved::Class(decoder));
            }
        }
        None
    }
}

fn decode_key(element: &Element<'_>) -> Result<String, Error> {
    let token = &element.token;
    match token.kind {
        TokenKind::String => Ok(parse_string_token(token)?.into_owned()),
        TokenKind::Identifier
        | TokenKind::ObjectKeyIdentifier
        | TokenKind::Number
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null => Ok(token.value.clone().into_owned()),
        other => Err(Error::structure(
            format!("token {other} is not an object key"),
            token.span,
        )),
    }
}

fn object_pairs(object: Object<'static>) -> Vec<(String, OwnedValue)> {
    match object {
        Object::Unique(map) => map
            .into_iter()
            .map(|(k, v)| (k.into_owned(), v))
            .collect(),
        Object::Multi(pairs) => pairs
            .into_iter()
            .map(|(k, v)| (k.into_owned(), v))
            .collect(),
    }
}

fn apply_constructor(
    resolved: Resolved,
    value: OwnedValue,
    annotation: &Annotation<'_>,
    span: Span,
) -> Result<OwnedValue, Error> {
    let name = annotation.source().unwrap_or("").to_string();
    let fail = |msg: String| Error::constructor(format!("annotation `{name}`: {msg}"), span);

    match resolved {
        Resolved::Hook(AnnotationConstructor::Value(f)) => f(value).map_err(fail),
        Resolved::Hook(AnnotationConstructor::ListAsArgs(f)) => match value.kind {
            ValueKind::Array(items) => f(items).map_err(fail),
            _ => Err(fail(format!(
                "constructor expects an array, got {}",
                value.type_name()
            ))),
        },
        Resolved::Hook(AnnotationConstructor::DictAsKeywordArgs(f)) => match value.kind {
            ValueKind::Object(object) => f(object_pairs(object)).map_err(fail),
            _ => Err(fail(format!(
                "constructor expects an object, got {}",
                value.type_name()
            ))),
        },
        Resolved::Class(decoder) => match (&*decoder, value) {
            (ClassDecoder::Inline(f) | ClassDecoder::Enum(f), value) => f(value).map_err(fail),
            (ClassDecoder::Dataclass(f), value) => match value.kind {
                ValueKind::Object(object) => f(object_pairs(object)).map_err(fail),
                _ => Err(fail(format!(
                    "dataclass decoder expects an object, got {}",
                    value.type_name()
                ))),
            },
        },
    }
}

/// Parse a document with default options.
pub fn parse(src: &str) -> Result<OwnedValue, Error> {
    Parser::new(src).parse()
}
