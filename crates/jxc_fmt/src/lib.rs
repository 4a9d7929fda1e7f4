//! Serializer for JXC.
//!
//! Two layers, mirroring the decode side:
//!
//! - [`Serializer`] — the stateful writer with explicit operations
//!   (`value_*`, container begin/sep/end, `annotation`) and a container
//!   stack enforcing call order, separators, indentation, and token
//!   adjacency.
//! - [`Encoder`] — routes whole [`jxc_ir::Value`] trees through the
//!   serializer, with key sorting, a find-encoder callback, a fallback
//!   encoder, and the [`ToJxc`] inline-encode trait for host types.
//!
//! [`SerializerSettings`] shapes the output; [`SerializerSettings::compact`]
//! and [`SerializerSettings::pretty`] are the two presets.

mod encode;
mod serializer;
mod settings;

pub use encode::{EncodeFn, Encoder, FindEncoderFn, ToJxc};
pub use serializer::Serializer;
pub use settings::{DateTimeMode, FloatMode, SerializerSettings, StringQuoteMode};

use jxc_diagnostic::Error;
use jxc_ir::Value;

/// Serialize a value with the given settings.
pub fn to_string(value: &Value<'_>, settings: &SerializerSettings) -> Result<String, Error> {
    let mut serializer = Serializer::new_string(settings.clone());
    serializer.value_auto(value)?;
    serializer.finish()
}

/// Serialize a value in the compact preset.
pub fn to_string_compact(value: &Value<'_>) -> Result<String, Error> {
    to_string(value, &SerializerSettings::compact())
}
