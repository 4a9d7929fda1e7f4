//! The value encoder.
//!
//! [`Encoder`] wraps a [`Serializer`] and routes whole [`Value`] trees:
//! object keys can be sorted, a find-encoder callback can intercept any
//! value (by shape, annotation, or anything else it can see), and a
//! fallback encoder catches what the callback declines. Host types encode
//! themselves through the [`ToJxc`] trait.

use std::fmt;
use std::rc::Rc;

use jxc_diagnostic::Error;
use jxc_ir::{Value, ValueKind};

use crate::serializer::Serializer;
use crate::settings::SerializerSettings;

/// A custom encoder for one value.
pub type EncodeFn<W> = Rc<dyn Fn(&mut Serializer<W>, &Value<'_>) -> Result<(), Error>>;

/// Callback choosing a custom encoder per value; `None` falls through to
/// the default routing.
pub type FindEncoderFn<W> = Rc<dyn Fn(&Value<'_>) -> Option<EncodeFn<W>>>;

/// Inline-encode interface for host types.
pub trait ToJxc {
    fn encode_jxc<W: fmt::Write>(&self, serializer: &mut Serializer<W>) -> Result<(), Error>;
}

/// Value-tree encoder over a serializer.
pub struct Encoder<W: fmt::Write> {
    serializer: Serializer<W>,
    sort_keys: bool,
    find_encoder: Option<FindEncoderFn<W>>,
    fallback_encoder: Option<EncodeFn<W>>,
}

impl Encoder<String> {
    /// Encoder writing into a fresh string.
    pub fn new_string(settings: SerializerSettings) -> Self {
        Encoder::new(Serializer::new_string(settings))
    }
}

impl<W: fmt::Write> Encoder<W> {
    pub fn new(serializer: Serializer<W>) -> Self {
        Encoder {
            serializer,
            sort_keys: false,
            find_encoder: None,
            fallback_encoder: None,
        }
    }

    /// Emit object pairs in lexicographic key order.
    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Consulted for every value before the default routing.
    pub fn set_find_encoder(&mut self, find: FindEncoderFn<W>) {
        self.find_encoder = Some(find);
    }

    /// Used when the find-encoder callback declines a value.
    pub fn set_fallback_encoder(&mut self, fallback: EncodeFn<W>) {
        self.fallback_encoder = Some(fallback);
    }

    /// Direct access to the underlying serializer, for custom call
    /// sequences between encoded values.
    pub fn serializer(&mut self) -> &mut Serializer<W> {
        &mut self.serializer
    }

    /// Encode one value tree.
    pub fn encode_value(&mut self, value: &Value<'_>) -> Result<(), Error> {
        if let Some(find) = self.find_encoder.clone() {
            if let Some(encode) = find(value) {
                return encode(&mut self.serializer, value);
            }
            if let Some(fallback) = self.fallback_encoder.clone() {
                return fallback(&mut self.serializer, value);
            }
        }
        self.encode_default(value)
    }

    /// Encode a host type through its [`ToJxc`] implementation.
    pub fn encode<T: ToJxc>(&mut self, value: &T) -> Result<(), Error> {
        value.encode_jxc(&mut self.serializer)
    }

    /// Finish writing and return the output target.
    pub fn finish(self) -> Result<W, Error> {
        self.serializer.finish()
    }

    fn encode_default(&mut self, value: &Value<'_>) -> Result<(), Error> {
        match &value.kind {
            ValueKind::Array(items) => {
                if let Some(annotation) = value.annotation.as_ref().and_then(|a| a.source()) {
                    self.serializer.annotation(annotation)?;
                }
                self.serializer.array_begin()?;
                for item in items {
                    self.encode_value(item)?;
                }
                self.serializer.array_end()
            }
            ValueKind::Object(object) => {
                if let Some(annotation) = value.annotation.as_ref().and_then(|a| a.source()) {
                    self.serializer.annotation(annotation)?;
                }
                self.serializer.object_begin()?;
                let mut pairs: Vec<(&str, &Value<'_>)> = object.iter().collect();
                if self.sort_keys {
                    pairs.sort_by(|a, b| a.0.cmp(b.0));
                }
                for (key, item) in pairs {
                    self.serializer.object_key(key)?;
                    self.serializer.object_sep()?;
                    self.encode_value(item)?;
                }
                self.serializer.object_end()
            }
            // Scalars and expressions have no nested values to intercept
            _ => self.serializer.value_auto(value),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]
mod tests {
    use super::*;
    use jxc_ir::Object;
    use pretty_assertions::assert_eq;

    fn obj(pairs: &[(&str, i64)]) -> Value<'static> {
        let mut object = Object::new();
        for (k, v) in pairs {
            object.insert((*k).to_string(), Value::from(*v));
        }
        Value::from(object)
    }

    #[test]
    fn default_routing_matches_value_auto() {
        let value = Value::from(vec![Value::from(true), Value::from(1234i64)]);
        let mut encoder = Encoder::new_string(SerializerSettings::compact());
        encoder.encode_value(&value).unwrap();
        assert_eq!(encoder.finish().unwrap(), "[true,1234]");
    }

    #[test]
    fn sort_keys_orders_pairs() {
        let value = obj(&[("z", 1), ("a", 2), ("m", 3)]);
        let mut encoder =
            Encoder::new_string(SerializerSettings::compact()).with_sort_keys(true);
        encoder.encode_value(&value).unwrap();
        assert_eq!(encoder.finish().unwrap(), "{a:2,m:3,z:1}");
    }

    #[test]
    fn find_encoder_intercepts_by_shape() {
        // Replace every negative int with the identifier `neg`
        let value = Value::from(vec![Value::from(1i64), Value::from(-2i64)]);
        let mut encoder = Encoder::new_string(SerializerSettings::compact());
        encoder.set_find_encoder(Rc::new(|v| {
            if v.as_i64().is_some_and(|n| n < 0) {
                Some(Rc::new(|ser: &mut Serializer<String>, _: &Value<'_>| {
                    ser.identifier("neg")
                }) as EncodeFn<String>)
            } else {
                None
            }
        }));
        encoder.encode_value(&value).unwrap();
        assert_eq!(encoder.finish().unwrap(), "[1,neg]");
    }

    #[test]
    fn fallback_encoder_catches_declined_values() {
        let value = Value::from(7i64);
        let mut encoder = Encoder::new_string(SerializerSettings::compact());
        encoder.set_find_encoder(Rc::new(|_| None));
        encoder.set_fallback_encoder(Rc::new(|ser: &mut Serializer<String>, v: &Value<'_>| {
            ser.value_string(&v.to_repr())
        }));
        encoder.encode_value(&value).unwrap();
        assert_eq!(encoder.finish().unwrap(), "\"7\"");
    }

    #[test]
    fn to_jxc_trait_encoding() {
        struct Rgb(u8, u8, u8);
        impl ToJxc for Rgb {
            fn encode_jxc<W: fmt::Write>(
                &self,
                serializer: &mut Serializer<W>,
            ) -> Result<(), Error> {
                serializer.annotation("rgb")?;
                serializer.array_begin()?;
                serializer.value_int(i64::from(self.0))?;
                serializer.value_int(i64::from(self.1))?;
                serializer.value_int(i64::from(self.2))?;
                serializer.array_end()
            }
        }

        let mut encoder = Encoder::new_string(SerializerSettings::compact());
        encoder.encode(&Rgb(20, 50, 150)).unwrap();
        assert_eq!(encoder.finish().unwrap(), "rgb[20,50,150]");
    }
}
