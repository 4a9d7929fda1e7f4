//! The default in-memory value model.
//!
//! A closed tagged variant plus metadata: every [`Value`] optionally carries
//! the annotation it was parsed with and, for numbers, the unit suffix that
//! was attached as metadata when no suffix hook claimed it. Equality
//! compares payloads only — metadata is provenance, not identity — and
//! integers compare across signedness (`Int(1) == UInt(1)`).
//!
//! Values borrow the input buffer where possible (`Cow` storage);
//! [`Value::into_owned`] detaches a whole tree so it can outlive the buffer.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{Annotation, DateTimeValue, Token};

/// Body of a parenthesized expression value.
///
/// Which form is produced depends on the expression parse mode selected at
/// parser construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionBody<'a> {
    /// Each token coerced to a primitive value.
    Values(Vec<Value<'a>>),
    /// The raw token list, verbatim.
    Tokens(Vec<Token<'a>>),
    /// The original substring between the parentheses.
    Source(Cow<'a, str>),
}

impl ExpressionBody<'_> {
    /// Number of items (tokens or values); source bodies report 0.
    pub fn len(&self) -> usize {
        match self {
            ExpressionBody::Values(v) => v.len(),
            ExpressionBody::Tokens(t) => t.len(),
            ExpressionBody::Source(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExpressionBody::Source(s) => s.is_empty(),
            _ => self.len() == 0,
        }
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> ExpressionBody<'static> {
        match self {
            ExpressionBody::Values(v) => {
                ExpressionBody::Values(v.into_iter().map(Value::into_owned).collect())
            }
            ExpressionBody::Tokens(t) => {
                ExpressionBody::Tokens(t.into_iter().map(Token::into_owned).collect())
            }
            ExpressionBody::Source(s) => ExpressionBody::Source(Cow::Owned(s.into_owned())),
        }
    }
}

/// Insertion-ordered object storage.
///
/// Two representations, selected at parser construction: `Unique` replaces
/// on duplicate keys (last wins, original position kept), `Multi` preserves
/// every pair in source order. Equality compares the iterated pair sequence,
/// so a `Unique` and a `Multi` object with the same pairs are equal.
#[derive(Clone, Debug)]
pub enum Object<'a> {
    Unique(IndexMap<Cow<'a, str>, Value<'a>>),
    Multi(Vec<(Cow<'a, str>, Value<'a>)>),
}

impl<'a> Object<'a> {
    /// Empty last-wins object.
    pub fn new() -> Self {
        Object::Unique(IndexMap::new())
    }

    /// Empty duplicate-preserving object.
    pub fn new_multi() -> Self {
        Object::Multi(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            Object::Unique(map) => map.len(),
            Object::Multi(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a pair. `Unique` replaces an existing key in place;
    /// `Multi` always appends.
    pub fn insert(&mut self, key: impl Into<Cow<'a, str>>, value: Value<'a>) {
        match self {
            Object::Unique(map) => {
                map.insert(key.into(), value);
            }
            Object::Multi(pairs) => pairs.push((key.into(), value)),
        }
    }

    /// Look up a key; for `Multi` objects the *last* occurrence wins.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        match self {
            Object::Unique(map) => map.get(key),
            Object::Multi(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        match self {
            Object::Unique(map) => map.get_mut(key),
            Object::Multi(pairs) => pairs
                .iter_mut()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> ObjectIter<'_, 'a> {
        match self {
            Object::Unique(map) => ObjectIter::Unique(map.iter()),
            Object::Multi(pairs) => ObjectIter::Multi(pairs.iter()),
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> Object<'static> {
        match self {
            Object::Unique(map) => Object::Unique(
                map.into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
            Object::Multi(pairs) => Object::Multi(
                pairs
                    .into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
        }
    }

    fn is_owned(&self) -> bool {
        match self {
            Object::Unique(map) => map
                .iter()
                .all(|(k, v)| matches!(k, Cow::Owned(_)) && v.is_owned()),
            Object::Multi(pairs) => pairs
                .iter()
                .all(|(k, v)| matches!(k, Cow::Owned(_)) && v.is_owned()),
        }
    }
}

impl Default for Object<'_> {
    fn default() -> Self {
        Object::new()
    }
}

impl PartialEq for Object<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a> FromIterator<(Cow<'a, str>, Value<'a>)> for Object<'a> {
    fn from_iter<I: IntoIterator<Item = (Cow<'a, str>, Value<'a>)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

/// Iterator over object pairs in insertion order.
pub enum ObjectIter<'s, 'a> {
    Unique(indexmap::map::Iter<'s, Cow<'a, str>, Value<'a>>),
    Multi(std::slice::Iter<'s, (Cow<'a, str>, Value<'a>)>),
}

impl<'s, 'a> Iterator for ObjectIter<'s, 'a> {
    type Item = (&'s str, &'s Value<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ObjectIter::Unique(it) => it.next().map(|(k, v)| (k.as_ref(), v)),
            ObjectIter::Multi(it) => it.next().map(|(k, v)| (k.as_ref(), v)),
        }
    }
}

/// Payload of a value.
#[derive(Clone, Debug)]
pub enum ValueKind<'a> {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integer; produced when a literal exceeds `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Date(NaiveDate),
    DateTime(DateTimeValue),
    Array(Vec<Value<'a>>),
    Object(Object<'a>),
    Expression(ExpressionBody<'a>),
}

impl PartialEq for ValueKind<'_> {
    fn eq(&self, other: &Self) -> bool {
        use ValueKind::{
            Array, Bool, Bytes, Date, DateTime, Expression, Float, Int, Null, Object, String, UInt,
        };
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => u64::try_from(*a) == Ok(*b),
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (DateTime(a), DateTime(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            (Expression(a), Expression(b)) => a == b,
            _ => false,
        }
    }
}

/// A parsed value with its metadata.
///
/// `annotation` is the flattened annotation token list when one was attached
/// in the source (or injected for serialization). `suffix` is the numeric
/// unit suffix retained as metadata when no suffix hook consumed it.
#[derive(Clone, Debug, Default)]
pub struct Value<'a> {
    pub kind: ValueKind<'a>,
    pub annotation: Option<Annotation<'a>>,
    pub suffix: Option<Cow<'a, str>>,
}

impl Default for ValueKind<'_> {
    fn default() -> Self {
        ValueKind::Null
    }
}

impl PartialEq for Value<'_> {
    /// Payload equality; annotation and suffix metadata do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl<'a> Value<'a> {
    pub fn new(kind: ValueKind<'a>) -> Self {
        Value {
            kind,
            annotation: None,
            suffix: None,
        }
    }

    pub fn null() -> Self {
        Value::new(ValueKind::Null)
    }

    /// Attach an annotation, replacing any existing one.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation<'a>) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn set_annotation(&mut self, annotation: Option<Annotation<'a>>) {
        self.annotation = annotation;
    }

    /// Attach a numeric unit suffix, replacing any existing one.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<Cow<'a, str>>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Short name of the payload kind, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ValueKind::Null => "null",
            ValueKind::Bool(_) => "bool",
            ValueKind::Int(_) => "int",
            ValueKind::UInt(_) => "uint",
            ValueKind::Float(_) => "float",
            ValueKind::String(_) => "string",
            ValueKind::Bytes(_) => "bytes",
            ValueKind::Date(_) => "date",
            ValueKind::DateTime(_) => "datetime",
            ValueKind::Array(_) => "array",
            ValueKind::Object(_) => "object",
            ValueKind::Expression(_) => "expression",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, ValueKind::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Signed integer view; `UInt` converts when it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Int(v) => Some(v),
            ValueKind::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Unsigned integer view; `Int` converts when non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self.kind {
            ValueKind::UInt(v) => Some(v),
            ValueKind::Int(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Floating-point view; integers widen.
    #[allow(
        clippy::cast_precision_loss,
        reason = "widening to f64 is the documented lossy cast"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Float(v) => Some(v),
            ValueKind::Int(v) => Some(v as f64),
            ValueKind::UInt(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            ValueKind::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ValueKind::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTimeValue> {
        match self.kind {
            ValueKind::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value<'a>>> {
        match &mut self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        match &self.kind {
            ValueKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object<'a>> {
        match &mut self.kind {
            ValueKind::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&ExpressionBody<'a>> {
        match &self.kind {
            ValueKind::Expression(body) => Some(body),
            _ => None,
        }
    }

    /// Number of elements (array/object/expression) or bytes/chars
    /// (bytes/string); `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match &self.kind {
            ValueKind::Array(items) => Some(items.len()),
            ValueKind::Object(obj) => Some(obj.len()),
            ValueKind::Expression(body) => Some(body.len()),
            ValueKind::String(s) => Some(s.chars().count()),
            ValueKind::Bytes(b) => Some(b.len()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Array element by index.
    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Object value by key (last occurrence wins for multi objects).
    pub fn get_key(&self, key: &str) -> Option<&Value<'a>> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// `true` if an array contains `needle` or an object contains the key.
    pub fn contains(&self, needle: &Value<'a>) -> bool {
        match &self.kind {
            ValueKind::Array(items) => items.contains(needle),
            ValueKind::Object(obj) => needle
                .as_str()
                .is_some_and(|key| obj.contains_key(key)),
            _ => false,
        }
    }

    /// Append to an array value. Returns `false` for non-arrays.
    pub fn push(&mut self, value: Value<'a>) -> bool {
        match &mut self.kind {
            ValueKind::Array(items) => {
                items.push(value);
                true
            }
            _ => false,
        }
    }

    /// Replace an array element. Returns `false` when out of range or not
    /// an array.
    pub fn set_index(&mut self, index: usize, value: Value<'a>) -> bool {
        match &mut self.kind {
            ValueKind::Array(items) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Insert or replace an object pair. Returns `false` for non-objects.
    pub fn set_key(&mut self, key: impl Into<Cow<'a, str>>, value: Value<'a>) -> bool {
        match &mut self.kind {
            ValueKind::Object(obj) => {
                obj.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// `true` when every nested string/bytes/token holds owned storage, so
    /// the value can be retained after the source buffer is dropped.
    pub fn is_owned(&self) -> bool {
        let metadata_owned = self
            .annotation
            .as_ref()
            .is_none_or(|a| a.tokens().iter().all(Token::is_owned))
            && self.suffix.as_ref().is_none_or(|s| matches!(s, Cow::Owned(_)));
        if !metadata_owned {
            return false;
        }
        match &self.kind {
            ValueKind::String(s) => matches!(s, Cow::Owned(_)),
            ValueKind::Bytes(b) => matches!(b, Cow::Owned(_)),
            ValueKind::Array(items) => items.iter().all(Value::is_owned),
            ValueKind::Object(obj) => obj.is_owned(),
            ValueKind::Expression(body) => match body {
                ExpressionBody::Values(v) => v.iter().all(Value::is_owned),
                ExpressionBody::Tokens(t) => t.iter().all(Token::is_owned),
                ExpressionBody::Source(s) => matches!(s, Cow::Owned(_)),
            },
            _ => true,
        }
    }

    /// Detach the whole tree from the source buffer.
    pub fn into_owned(self) -> Value<'static> {
        let kind = match self.kind {
            ValueKind::Null => ValueKind::Null,
            ValueKind::Bool(b) => ValueKind::Bool(b),
            ValueKind::Int(v) => ValueKind::Int(v),
            ValueKind::UInt(v) => ValueKind::UInt(v),
            ValueKind::Float(v) => ValueKind::Float(v),
            ValueKind::String(s) => ValueKind::String(Cow::Owned(s.into_owned())),
            ValueKind::Bytes(b) => ValueKind::Bytes(Cow::Owned(b.into_owned())),
            ValueKind::Date(d) => ValueKind::Date(d),
            ValueKind::DateTime(dt) => ValueKind::DateTime(dt),
            ValueKind::Array(items) => {
                ValueKind::Array(items.into_iter().map(Value::into_owned).collect())
            }
            ValueKind::Object(obj) => ValueKind::Object(obj.into_owned()),
            ValueKind::Expression(body) => ValueKind::Expression(body.into_owned()),
        };
        Value {
            kind,
            annotation: self.annotation.map(Annotation::into_owned),
            suffix: self.suffix.map(|s| Cow::Owned(s.into_owned())),
        }
    }

    /// Compact debug form: `vec3{x: 1, y: 2}`-style single-line rendering.
    pub fn to_repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out);
        out
    }

    fn write_repr(&self, out: &mut String) {
        use fmt::Write;
        if let Some(anno) = &self.annotation {
            if let Some(src) = anno.source() {
                out.push_str(src);
                out.push(' ');
            }
        }
        match &self.kind {
            ValueKind::Null => out.push_str("null"),
            ValueKind::Bool(true) => out.push_str("true"),
            ValueKind::Bool(false) => out.push_str("false"),
            ValueKind::Int(v) => {
                let _ = write!(out, "{v}");
            }
            ValueKind::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            ValueKind::Float(v) => {
                let _ = write!(out, "{v:?}");
            }
            ValueKind::String(s) => {
                let _ = write!(out, "{s:?}");
            }
            ValueKind::Bytes(b) => {
                let _ = write!(out, "bytes[{}]", b.len());
            }
            ValueKind::Date(d) => {
                let _ = write!(out, "dt\"{d}\"");
            }
            ValueKind::DateTime(dt) => {
                let _ = write!(out, "dt\"{dt}\"");
            }
            ValueKind::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out);
                }
                out.push(']');
            }
            ValueKind::Object(obj) => {
                out.push('{');
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{key}: ");
                    value.write_repr(out);
                }
                out.push('}');
            }
            ValueKind::Expression(body) => {
                out.push('(');
                match body {
                    ExpressionBody::Values(values) => {
                        for (i, value) in values.iter().enumerate() {
                            if i > 0 {
                                out.push(' ');
                            }
                            value.write_repr(out);
                        }
                    }
                    ExpressionBody::Tokens(tokens) => {
                        for (i, tok) in tokens.iter().enumerate() {
                            if i > 0 {
                                out.push(' ');
                            }
                            out.push_str(&tok.value);
                        }
                    }
                    ExpressionBody::Source(src) => out.push_str(src),
                }
                out.push(')');
            }
        }
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::new(ValueKind::Bool(v))
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Value::new(ValueKind::Int(v))
    }
}

impl From<i32> for Value<'_> {
    fn from(v: i32) -> Self {
        Value::new(ValueKind::Int(i64::from(v)))
    }
}

impl From<u64> for Value<'_> {
    fn from(v: u64) -> Self {
        Value::new(ValueKind::UInt(v))
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::new(ValueKind::Float(v))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::new(ValueKind::String(Cow::Borrowed(v)))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::new(ValueKind::String(Cow::Owned(v)))
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(v: Vec<u8>) -> Self {
        Value::new(ValueKind::Bytes(Cow::Owned(v)))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(v: Vec<Value<'a>>) -> Self {
        Value::new(ValueKind::Array(v))
    }
}

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(v: Object<'a>) -> Self {
        Value::new(ValueKind::Object(v))
    }
}

impl From<NaiveDate> for Value<'_> {
    fn from(v: NaiveDate) -> Self {
        Value::new(ValueKind::Date(v))
    }
}

impl From<DateTimeValue> for Value<'_> {
    fn from(v: DateTimeValue) -> Self {
        Value::new(ValueKind::DateTime(v))
    }
}

impl<'a> std::ops::Index<usize> for Value<'a> {
    type Output = Value<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index {index} out of range for {}", self.type_name()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_equality_crosses_signedness() {
        assert_eq!(Value::from(1i64), Value::from(1u64));
        assert_ne!(Value::from(-1i64), Value::from(1u64));
        assert_ne!(Value::from(1i64), Value::from(1.0));
    }

    #[test]
    fn metadata_does_not_affect_equality() {
        let plain = Value::from(5i64);
        let suffixed = Value::from(5i64).with_suffix("px");
        assert_eq!(plain, suffixed);
    }

    #[test]
    fn object_last_wins_vs_multi() {
        let mut unique = Object::new();
        unique.insert("a", Value::from(1i64));
        unique.insert("a", Value::from(2i64));
        assert_eq!(unique.len(), 1);
        assert_eq!(unique.get("a"), Some(&Value::from(2i64)));

        let mut multi = Object::new_multi();
        multi.insert("a", Value::from(1i64));
        multi.insert("a", Value::from(2i64));
        assert_eq!(multi.len(), 2);
        // Lookup still resolves to the last occurrence
        assert_eq!(multi.get("a"), Some(&Value::from(2i64)));
    }

    #[test]
    fn object_equality_ignores_representation() {
        let mut unique = Object::new();
        unique.insert("x", Value::from(1i64));
        unique.insert("y", Value::from(2i64));

        let mut multi = Object::new_multi();
        multi.insert("x", Value::from(1i64));
        multi.insert("y", Value::from(2i64));

        assert_eq!(unique, multi);
    }

    #[test]
    fn object_preserves_insertion_order() {
        let mut obj = Object::new();
        obj.insert("z", Value::from(1i64));
        obj.insert("a", Value::from(2i64));
        obj.insert("m", Value::from(3i64));
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn mutation_surface() {
        let mut arr = Value::from(vec![Value::from(1i64)]);
        assert!(arr.push(Value::from(2i64)));
        assert!(arr.set_index(0, Value::from(10i64)));
        assert!(!arr.set_index(5, Value::null()));
        assert_eq!(arr[0], Value::from(10i64));
        assert_eq!(arr.len(), Some(2));

        let mut obj = Value::from(Object::new());
        assert!(obj.set_key("k", Value::from("v")));
        assert_eq!(obj.get_key("k"), Some(&Value::from("v")));
        assert!(!Value::null().contains(&Value::from(1i64)));
    }

    #[test]
    fn into_owned_detaches_borrows() {
        let source = String::from("borrowed");
        let v = Value::from(source.as_str());
        assert!(!v.is_owned());
        let owned = v.into_owned();
        assert!(owned.is_owned());
        assert_eq!(owned.as_str(), Some("borrowed"));
    }

    #[test]
    fn repr_is_compact() {
        let mut obj = Object::new();
        obj.insert("x", Value::from(1i64));
        obj.insert("y", Value::from(0.5));
        let value = Value::from(vec![Value::from(obj), Value::null(), Value::from(true)]);
        assert_eq!(value.to_repr(), "[{x: 1, y: 0.5}, null, true]");
    }
}
