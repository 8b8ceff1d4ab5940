//! Token assembly over the classified character sequence
//!
//! The tokenizer walks the scanner output with a forward-only cursor. Each
//! iteration picks a [`Mode`] from the current character, runs it, and applies
//! the resulting [`Step`]. There is no recursion per token.

use super::classifier::{classify_pair, is_reserved_word, CharacterClass, QUOTE};
use super::scanner::{ClassifiedChar, PositionScanner};
use crate::config::runtime::LexicalPreferences;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success, log_warning};
use std::collections::BTreeMap;

/// Lexical failure conditions, reported through the diagnostic sink
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unrecognized character '{character}' at line {line}, column {column}")]
    UnrecognizedSyntax {
        character: char,
        line: u32,
        column: u32,
    },

    #[error("String starting at line {line}, column {column} is not terminated")]
    UnterminatedString { line: u32, column: u32 },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        self.kind().code()
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LexerError::UnrecognizedSyntax { .. } => DiagnosticKind::UnrecognizedSyntax,
            LexerError::UnterminatedString { .. } => DiagnosticKind::EofWhileParsingString,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            LexerError::UnrecognizedSyntax { line, .. }
            | LexerError::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            LexerError::UnrecognizedSyntax { column, .. }
            | LexerError::UnterminatedString { column, .. } => *column,
        }
    }
}

impl From<LexerError> for Diagnostic {
    fn from(error: LexerError) -> Self {
        let mut diagnostic = Diagnostic::error(error.kind().message(), error.line(), error.column());
        diagnostic.kind = Some(error.kind());
        diagnostic
    }
}

/// Per-run lexical metrics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub statement_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub string_tokens: usize,
    pub symbol_tokens: usize,
    pub compound_operators: usize,
    pub whitespace_skipped: usize,
    pub unrecognized_chars: usize,
    pub unterminated_strings: usize,
    pub max_string_length: usize,
    pub halted: bool,

    // Only filled when operator tracking is enabled
    pub operator_usage_patterns: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.kind {
            TokenKind::Statement => self.statement_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Number => self.number_tokens += 1,
            TokenKind::String => {
                self.string_tokens += 1;
                self.max_string_length = self.max_string_length.max(token.value.chars().count());
            }
            TokenKind::Symbol => {
                self.symbol_tokens += 1;
                if token.value.chars().count() > 1 {
                    self.compound_operators += 1;
                }

                if preferences.track_operator_patterns {
                    *self
                        .operator_usage_patterns
                        .entry(token.value.clone())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    pub fn diagnostic_count(&self) -> usize {
        self.unrecognized_chars + self.unterminated_strings
    }
}

/// How the character under the cursor is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    StringLiteral,
    NumberLiteral,
    Identifier,
    Operator,
}

impl Mode {
    fn for_char(current: &ClassifiedChar) -> Self {
        if current.value == QUOTE {
            return Mode::StringLiteral;
        }
        match current.class {
            CharacterClass::Number => Mode::NumberLiteral,
            CharacterClass::Identifier => Mode::Identifier,
            _ => Mode::Operator,
        }
    }
}

/// Outcome of one mode run; `next` is the cursor index to continue from
#[derive(Debug)]
enum Step {
    Emit { token: Token, next: usize },
    Skip { next: usize },
    Fail { error: LexerError, next: usize },
    /// Input ran out inside a construct cut short by a halted scan
    Abandon,
}

/// Forwards to the caller's sink and mirrors lexer entries to the global logger
struct MirroredSink<'s, S: ?Sized> {
    inner: &'s mut S,
    mirror: bool,
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for MirroredSink<'_, S> {
    fn append(&mut self, diagnostic: Diagnostic) {
        if self.mirror {
            if let Some(code) = diagnostic.code() {
                log_error!(code, &diagnostic.message,
                    "line" => diagnostic.line,
                    "column" => diagnostic.column
                );
            }
        }
        self.inner.append(diagnostic);
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        self.inner.diagnostics()
    }
}

/// Two-stage tokenizer: position scan, then token assembly
#[derive(Debug, Default)]
pub struct Tokenizer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize `source`, appending every diagnostic to `sink`
    pub fn tokenize_into<S>(&mut self, source: &str, sink: &mut S) -> Vec<Token>
    where
        S: DiagnosticSink + ?Sized,
    {
        self.metrics = LexicalMetrics::default();
        let policy = self.preferences.recovery_policy;

        log_debug!("Starting lexical analysis",
            "chars" => source.chars().count(),
            "policy" => policy.as_str()
        );

        let mut sink = MirroredSink {
            inner: sink,
            mirror: self.preferences.mirror_diagnostics_to_log,
        };

        let scan = PositionScanner::new(policy).scan(source, &mut sink);
        self.metrics.unrecognized_chars = scan.unrecognized;
        self.metrics.halted = scan.halted();

        let chars = scan.chars.as_slice();
        let mut tokens = Vec::new();
        let mut cursor = 0;

        while let Some(current) = chars.get(cursor) {
            let step = match Mode::for_char(current) {
                Mode::StringLiteral => self.read_string(chars, cursor, scan.halted()),
                Mode::NumberLiteral => Self::read_number(chars, cursor),
                Mode::Identifier => Self::read_identifier(chars, cursor),
                Mode::Operator => self.read_operator(chars, cursor),
            };

            match step {
                Step::Emit { token, next } => {
                    self.metrics.record_token(&token, &self.preferences);
                    tokens.push(token);
                    cursor = next;
                }
                Step::Skip { next } => cursor = next,
                Step::Fail { error, next } => {
                    sink.append(error.into());
                    cursor = next;
                }
                Step::Abandon => break,
            }
        }

        if let Some(position) = scan.halted_at {
            log_warning!(code = codes::warnings::HALTED_ON_DIAGNOSTIC,
                "Tokenization halted at first unrecognized character",
                "line" => position.line,
                "column" => position.column
            );
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => tokens.len(),
            "diagnostics" => self.metrics.diagnostic_count(),
            "policy" => policy.as_str()
        );

        tokens
    }

    /// String-literal mode: everything up to the next quote, delimiters excluded
    fn read_string(&mut self, chars: &[ClassifiedChar], start: usize, halted: bool) -> Step {
        let opening = chars[start];
        let mut value = String::new();

        for (offset, ch) in chars[start + 1..].iter().enumerate() {
            if ch.value == QUOTE {
                return Step::Emit {
                    token: Token::new(
                        TokenKind::String,
                        value,
                        Span::new(opening.position, ch.end()),
                    ),
                    next: start + offset + 2,
                };
            }
            value.push(ch.value);
        }

        if halted {
            // The input did not end here; the scan stopped
            return Step::Abandon;
        }

        self.metrics.unterminated_strings += 1;
        Step::Fail {
            error: LexerError::UnterminatedString {
                line: opening.line(),
                column: opening.column(),
            },
            next: chars.len(),
        }
    }

    /// Number-literal mode: digits with at most one '.' that is followed by a digit
    fn read_number(chars: &[ClassifiedChar], start: usize) -> Step {
        let mut value = String::new();
        let mut has_decimal = false;
        let mut cursor = start;

        while let Some(ch) = chars.get(cursor) {
            let is_fraction_dot = !has_decimal
                && ch.value == '.'
                && chars
                    .get(cursor + 1)
                    .is_some_and(|next| next.class == CharacterClass::Number);

            if ch.class == CharacterClass::Number {
                value.push(ch.value);
            } else if is_fraction_dot {
                has_decimal = true;
                value.push('.');
            } else {
                break;
            }
            cursor += 1;
        }

        Step::Emit {
            token: Token::new(TokenKind::Number, value, span_of(chars, start, cursor)),
            next: cursor,
        }
    }

    /// Identifier mode: letters and digits, reclassified if reserved
    fn read_identifier(chars: &[ClassifiedChar], start: usize) -> Step {
        let end = chars[start..]
            .iter()
            .position(|ch| {
                !matches!(
                    ch.class,
                    CharacterClass::Identifier | CharacterClass::Number
                )
            })
            .map_or(chars.len(), |offset| start + offset);

        let value: String = chars[start..end].iter().map(|ch| ch.value).collect();
        let kind = if is_reserved_word(&value) {
            TokenKind::Statement
        } else {
            TokenKind::Identifier
        };

        Step::Emit {
            token: Token::new(kind, value, span_of(chars, start, end)),
            next: end,
        }
    }

    /// Operator mode: skip whitespace, merge compound operators by lookahead
    fn read_operator(&mut self, chars: &[ClassifiedChar], start: usize) -> Step {
        let current = chars[start];

        if current.class == CharacterClass::Whitespace {
            self.metrics.whitespace_skipped += 1;
            return Step::Skip { next: start + 1 };
        }

        if let Some(next) = chars.get(start + 1) {
            if classify_pair(current.value, next.value) == CharacterClass::Symbol {
                let value: String = [current.value, next.value].iter().collect();
                return Step::Emit {
                    token: Token::new(TokenKind::Symbol, value, span_of(chars, start, start + 2)),
                    next: start + 2,
                };
            }
        }

        Step::Emit {
            token: Token::new(TokenKind::Symbol, current.value, current.span()),
            next: start + 1,
        }
    }
}

/// Span from `chars[start]` to the end of `chars[end - 1]`
fn span_of(chars: &[ClassifiedChar], start: usize, end: usize) -> Span {
    let first: Position = chars[start].position;
    let last = chars[end - 1].end();
    Span::new(first, last)
}
