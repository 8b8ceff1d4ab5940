//! Cursor over a finished token sequence for downstream parsers

use crate::logging::codes::{self, Code};
use crate::tokens::token::{Token, TokenKind};
use crate::utils::{SourceMap, Span};

/// Token stream consumption errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Expected {expected}, but reached end of input")]
    UnexpectedEndOfStream { expected: String },
}

impl TokenStreamError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::token_stream::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfStream { .. } => codes::token_stream::UNEXPECTED_END_OF_INPUT,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. } => Some(*span),
            Self::UnexpectedEndOfStream { .. } => None,
        }
    }
}

/// Saved cursor position for backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Forward cursor with lookahead and backtracking over tokens
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    /// Source map for error reporting
    source_map: Option<SourceMap>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            source_map: None,
        }
    }

    /// Create stream with source map for enhanced error reporting
    pub fn with_source_map(tokens: Vec<Token>, source_map: SourceMap) -> Self {
        Self {
            tokens,
            position: 0,
            source_map: Some(source_map),
        }
    }

    // === CORE NAVIGATION ===

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Peek at the next token without advancing
    pub fn peek(&self) -> Option<&Token> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions; `peek_ahead(0)` is the current token
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Move to the next token and return it
    pub fn advance(&mut self) -> Option<&Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    // === MATCHING ===

    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == kind)
    }

    pub fn check_value(&self, value: &str) -> bool {
        self.current().is_some_and(|token| token.value == value)
    }

    /// Consume the current token if it matches predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        let token = self.current().filter(|token| predicate(token)).cloned()?;
        self.advance();
        Some(token)
    }

    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, TokenStreamError> {
        self.expect(|token| token.kind == kind, || format!("{}", kind))
    }

    pub fn expect_symbol(&mut self, symbol: &str) -> Result<Token, TokenStreamError> {
        self.expect(|token| token.is_symbol(symbol), || format!("'{}'", symbol))
    }

    fn expect<P, D>(&mut self, predicate: P, describe: D) -> Result<Token, TokenStreamError>
    where
        P: FnOnce(&Token) -> bool,
        D: FnOnce() -> String,
    {
        match self.current() {
            Some(current) if predicate(current) => {
                let token = current.clone();
                self.advance();
                Ok(token)
            }
            Some(current) => Err(TokenStreamError::UnexpectedToken {
                expected: describe(),
                found: current.source_text(),
                span: current.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream {
                expected: describe(),
            }),
        }
    }

    // === BACKTRACKING ===

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0.min(self.tokens.len());
    }

    // === ERROR REPORTING ===

    /// Format an error with source context when a source map is attached
    pub fn format_error(&self, error: &TokenStreamError) -> String {
        let span = error
            .span()
            .or_else(|| self.tokens.last().map(|token| token.span));

        match (&self.source_map, span) {
            (Some(source_map), Some(span)) => source_map.format_error(&span, &error.to_string()),
            _ => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use assert_matches::assert_matches;

    fn stream(source: &str) -> TokenStream {
        TokenStream::with_source_map(tokenize(source).tokens, SourceMap::new(source))
    }

    #[test]
    fn test_navigation() {
        let mut s = stream("let x = 5");

        assert_eq!(s.len(), 4);
        assert!(s.current().is_some_and(|t| t.is_statement("let")));
        assert_eq!(s.peek().map(|t| t.value.as_str()), Some("x"));
        assert_eq!(s.peek_ahead(3).map(|t| t.value.as_str()), Some("5"));
        assert!(s.peek_ahead(4).is_none());

        assert_eq!(s.advance().map(|t| t.value.as_str()), Some("x"));
        s.advance();
        s.advance();
        assert!(s.advance().is_none());
        assert!(s.is_at_end());
        assert!(s.advance().is_none());
        assert!(s.remaining().is_empty());
    }

    #[test]
    fn test_expectations() {
        let mut s = stream("x >= 3");

        let ident = s.expect_kind(TokenKind::Identifier).unwrap();
        assert_eq!(ident.value, "x");
        assert!(s.check_value(">="));
        s.expect_symbol(">=").unwrap();

        let err = s.expect_symbol(";").unwrap_err();
        assert_matches!(&err, TokenStreamError::UnexpectedToken { found, .. } if found == "3");
        assert_eq!(err.error_code(), codes::token_stream::UNEXPECTED_TOKEN);

        s.expect_kind(TokenKind::Number).unwrap();
        assert_matches!(
            s.expect_kind(TokenKind::Symbol),
            Err(TokenStreamError::UnexpectedEndOfStream { .. })
        );
    }

    #[test]
    fn test_consume_if_and_backtracking() {
        let mut s = stream("if a then b");

        let checkpoint = s.checkpoint();
        assert!(s.consume_if(|t| t.is_statement("if")).is_some());
        assert!(s.consume_if(|t| t.is_statement("then")).is_none());
        assert!(s.check_kind(TokenKind::Identifier));

        s.restore(checkpoint);
        assert_eq!(s.position(), 0);
        assert!(s.check_kind(TokenKind::Statement));
    }

    #[test]
    fn test_format_error_uses_source_map() {
        let mut s = stream("let = 1");
        s.advance();
        let err = s.expect_kind(TokenKind::Identifier).unwrap_err();
        let rendered = s.format_error(&err);

        assert!(rendered.contains("--> 1:5"));
        assert!(rendered.contains("1 | let = 1"));

        let bare = TokenStream::new(Vec::new());
        let err = TokenStreamError::UnexpectedEndOfStream {
            expected: "identifier".to_string(),
        };
        assert_eq!(
            bare.format_error(&err),
            "Error: Expected identifier, but reached end of input"
        );
    }
}
