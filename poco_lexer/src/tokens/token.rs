//! Token types produced by the tokenizer
use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    /// Operator or delimiter, single or compound (`>=`, `->`, ...)
    Symbol,
    /// Decimal integer or fraction
    Number,
    Identifier,
    /// Identifier that matched a reserved word
    Statement,
    /// String literal contents without delimiters
    String,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Statement => "statement",
            TokenKind::String => "string",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::String)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its text and source location.
///
/// The span starts at the token's first character and ends one past the last
/// character consumed for it, closing quote included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Position of the first character
    pub fn position(&self) -> Position {
        self.span.start
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Check for a specific symbol, e.g. `token.is_symbol(">=")`
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.value == symbol
    }

    /// Check for a specific reserved word
    pub fn is_statement(&self, word: &str) -> bool {
        self.kind == TokenKind::Statement && self.value == word
    }

    /// Text as it would appear in source
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::String => format!("'{}'", self.value),
            _ => self.value.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} at {}",
            self.kind,
            self.value,
            self.span.start
        )
    }
}
