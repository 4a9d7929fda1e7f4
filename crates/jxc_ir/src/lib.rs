//! Core data types for the JXC format.
//!
//! This crate contains the shared vocabulary of the parsing and
//! serialization pipeline:
//! - [`Span`] for byte ranges into the source buffer
//! - [`Token`] / [`TokenKind`] for lexer output
//! - [`Element`] / [`ElementKind`] for the element stream emitted by the
//!   structural parser
//! - [`NumberSplit`] for the syntactic decomposition of numeric literals
//! - [`DateTimeValue`] for `dt"..."` literals with an optional UTC offset
//! - [`Value`] — the default in-memory value model
//!
//! Tokens and values reference the input buffer through `Cow<str>`: parsing
//! borrows (view mode), and [`Value::into_owned`] / [`Token::into_owned`]
//! detach a tree from the buffer when it must outlive it.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod datetime;
mod element;
mod number;
mod span;
mod token;
mod value;

pub use datetime::DateTimeValue;
pub use element::{Annotation, Element, ElementKind};
pub use number::{join_number, split_number, FloatLiteralKind, NumberBase, NumberSplit};
pub use span::{Span, INVALID_IDX};
pub use token::{
    is_valid_expression_identifier, is_valid_identifier, is_valid_object_key_identifier, Token,
    TokenKind,
};
pub use value::{ExpressionBody, Object, Value, ValueKind};

// Re-exported so downstream crates name chrono types through one door.
pub use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
