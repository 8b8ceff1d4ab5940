//! Shared source-location types used by the scanner, tokenizer and diagnostics.

pub mod span;

pub use span::{Position, SourceMap, Span};
