//! Hand-written low-level tokenizer for JXC.
//!
//! This crate is standalone: it knows about bytes and token boundaries,
//! nothing about keywords, escapes, or values. The [`RawScanner`] produces
//! `(tag, length)` pairs with zero heap allocation; the cooking layer in
//! `jxc_lexer` turns those into typed tokens.
//!
//! The grammar is context-sensitive, so [`RawScanner::next_token`] takes a
//! [`LexMode`]: inside expressions, operator characters fuse into runs and
//! `+`/`-` never act as number signs; in object-key position, identifiers
//! admit `*` and dotted/dashed segments.

mod cursor;
mod scanner;
mod tag;

pub use cursor::Cursor;
pub use scanner::{tokenize, RawScanner};
pub use tag::{LexMode, RawTag, RawToken};
