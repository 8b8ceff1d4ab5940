//! Token system for Poco lexical analysis
//!
//! [`Token`] is the unit the tokenizer emits: a [`TokenKind`], the token text
//! and the [`Span`] it came from. [`TokenStream`] wraps a finished token vector
//! with the lookahead, matching and backtracking a parser needs.
//!
//! String tokens hold the literal contents without the surrounding quotes.
//! Whitespace never appears in a token sequence.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{Checkpoint, TokenStream, TokenStreamError};

pub use crate::utils::{Position, SourceMap, Span};
