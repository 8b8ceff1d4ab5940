//! Lexical analysis for Poco source text
//!
//! Tokenization is two stages over a complete source string. The
//! [`scanner`] classifies and positions every character, and the
//! [`analyzer`] assembles tokens from that sequence. Diagnostics go to a
//! caller-owned [`DiagnosticSink`]; a run never fails.

pub mod analyzer;
pub mod classifier;
pub mod scanner;

use crate::config::runtime::LexicalPreferences;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::tokens::{Token, TokenKind};
use serde::Serialize;

pub use analyzer::{LexerError, LexicalMetrics, Tokenizer};
pub use classifier::{
    classify, classify_char, classify_pair, is_compound_operator, is_reserved_word,
    is_whitespace_char, CharacterClass, COMPOUND_OPERATORS, QUOTE, RESERVED_WORDS, SYMBOLS,
};
pub use scanner::{ClassifiedChar, PositionScanner, ScanOutput};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokens and diagnostics of one run with a fresh sink
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenizeOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TokenizeOutput {
    /// Success means nothing at all was recorded
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Tokenize with environment-default preferences and a fresh sink
pub fn tokenize(source: &str) -> TokenizeOutput {
    tokenize_with_preferences(source, LexicalPreferences::default())
}

/// Tokenize into a caller-owned sink; reusing a sink accumulates entries
pub fn tokenize_into<S>(source: &str, sink: &mut S) -> Vec<Token>
where
    S: DiagnosticSink + ?Sized,
{
    Tokenizer::new().tokenize_into(source, sink)
}

pub fn tokenize_with_preferences(source: &str, preferences: LexicalPreferences) -> TokenizeOutput {
    let mut diagnostics = Vec::new();
    let tokens = Tokenizer::with_preferences(preferences).tokenize_into(source, &mut diagnostics);
    TokenizeOutput {
        tokens,
        diagnostics,
    }
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Token distribution of a finished sequence
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub statements: usize,
    pub identifiers: usize,
    pub numbers: usize,
    pub strings: usize,
    pub symbols: usize,
    pub compound_operators: usize,
}

impl TokenCounts {
    pub fn literals(&self) -> usize {
        self.numbers + self.strings
    }

    pub fn has_content(&self) -> bool {
        self.total > 0
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    tokens
        .iter()
        .fold(TokenCounts::default(), |mut counts, token| {
            counts.total += 1;
            match token.kind {
                TokenKind::Statement => counts.statements += 1,
                TokenKind::Identifier => counts.identifiers += 1,
                TokenKind::Number => counts.numbers += 1,
                TokenKind::String => counts.strings += 1,
                TokenKind::Symbol => {
                    counts.symbols += 1;
                    if is_compound_operator(&token.value) {
                        counts.compound_operators += 1;
                    }
                }
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::RecoveryPolicy;
    use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
    use crate::logging::{self, codes};
    use crate::utils::Position;
    use proptest::prelude::*;

    fn summary(output: &TokenizeOutput) -> Vec<(TokenKind, String)> {
        output
            .tokens
            .iter()
            .map(|t| (t.kind, t.value.clone()))
            .collect()
    }

    fn expected(items: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        items.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn quiet() -> LexicalPreferences {
        LexicalPreferences {
            mirror_diagnostics_to_log: false,
            ..LexicalPreferences::default()
        }
    }

    #[test]
    fn test_let_binding() {
        let output = tokenize("let x = 5");
        assert!(output.is_success());
        assert_eq!(
            summary(&output),
            expected(&[
                (TokenKind::Statement, "let"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Symbol, "="),
                (TokenKind::Number, "5"),
            ])
        );

        let columns: Vec<u32> = output.tokens.iter().map(Token::column).collect();
        assert_eq!(columns, vec![1, 5, 7, 9]);
    }

    #[test]
    fn test_string_with_space() {
        let output = tokenize("let name = 'Po Co'");
        assert!(output.is_success());
        assert_eq!(
            summary(&output),
            expected(&[
                (TokenKind::Statement, "let"),
                (TokenKind::Identifier, "name"),
                (TokenKind::Symbol, "="),
                (TokenKind::String, "Po Co"),
            ])
        );
    }

    #[test]
    fn test_compound_comparison() {
        let output = tokenize("x >= 3");
        assert_eq!(
            summary(&output),
            expected(&[
                (TokenKind::Identifier, "x"),
                (TokenKind::Symbol, ">="),
                (TokenKind::Number, "3"),
            ])
        );
        assert_eq!(output.tokens[1].column(), 3);
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(
            summary(&tokenize("3.14")),
            expected(&[(TokenKind::Number, "3.14")])
        );
        assert_eq!(
            summary(&tokenize("3.")),
            expected(&[(TokenKind::Number, "3"), (TokenKind::Symbol, ".")])
        );
    }

    #[test]
    fn test_unterminated_string() {
        let output = tokenize_with_preferences("'abc", quiet());
        assert!(output.tokens.is_empty());
        assert_eq!(output.diagnostics.len(), 1);

        let diagnostic = &output.diagnostics[0];
        assert_eq!(diagnostic.kind, Some(DiagnosticKind::EofWhileParsingString));
        assert_eq!(diagnostic.message, "EOF WHILE PARSING STRING");
        assert_eq!(diagnostic.position(), (1, 1));
    }

    #[test]
    fn test_reserved_words_case_sensitive() {
        let output = tokenize("let IF = 1");
        assert_eq!(output.tokens[1].kind, TokenKind::Identifier);
        assert_eq!(output.tokens[1].value, "IF");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(tokenize(""), TokenizeOutput::default());
        assert_eq!(tokenize(" \t\r\n  "), TokenizeOutput::default());
    }

    #[test]
    fn test_multiline_positions() {
        let output = tokenize("if a\nthen\r\n  b");
        let positions: Vec<(&str, u32, u32)> = output
            .tokens
            .iter()
            .map(|t| (t.value.as_str(), t.line(), t.column()))
            .collect();
        assert_eq!(
            positions,
            vec![("if", 1, 1), ("a", 1, 4), ("then", 2, 1), ("b", 3, 3)]
        );
    }

    #[test]
    fn test_unrecognized_resynchronizes() {
        let output = tokenize_with_preferences("a ; b", quiet());
        assert_eq!(
            summary(&output),
            expected(&[(TokenKind::Identifier, "a"), (TokenKind::Identifier, "b")])
        );
        assert!(output.has_errors());
        assert_eq!(
            output.diagnostics[0].to_string(),
            "UNRECOGNIZED SYNTAX -- line: 1, column: 3"
        );
    }

    #[test]
    fn test_halt_policy() {
        let preferences = LexicalPreferences {
            recovery_policy: RecoveryPolicy::Halt,
            ..quiet()
        };
        let output = tokenize_with_preferences("a ; b ; c", preferences);
        assert_eq!(summary(&output), expected(&[(TokenKind::Identifier, "a")]));
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_caller_owned_sink_accumulates() {
        let mut log = DiagnosticLog::new();
        log.log("first run", 1, 1);

        let first = tokenize_into("@", &mut log);
        let second = tokenize_into("'x", &mut log);

        assert!(first.is_empty() && second.is_empty());
        assert_eq!(log.len(), 3);
        assert_eq!(log.error_count(), 2);

        let kinds: Vec<_> = log.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                None,
                Some(DiagnosticKind::UnrecognizedSyntax),
                Some(DiagnosticKind::EofWhileParsingString),
            ]
        );
    }

    #[test]
    fn test_diagnostics_mirrored_to_logger() {
        let memory = logging::test_memory_logger();
        let source = "lexical-mirror-test";
        let preferences = LexicalPreferences {
            mirror_diagnostics_to_log: true,
            ..LexicalPreferences::default()
        };

        let output = logging::with_source_context(source, || {
            tokenize_with_preferences("x = 'open", preferences)
        });
        assert_eq!(output.diagnostics.len(), 1);

        let ours: Vec<_> = memory
            .get_events()
            .into_iter()
            .filter(|e| e.context.get("source").map(String::as_str) == Some(source))
            .collect();

        assert!(ours
            .iter()
            .any(|e| e.code == codes::lexical::EOF_WHILE_PARSING_STRING
                && e.context.get("line").map(String::as_str) == Some("1")
                && e.context.get("column").map(String::as_str) == Some("5")));
        assert!(ours
            .iter()
            .any(|e| e.code == codes::success::TOKENIZATION_COMPLETE));
    }

    #[test]
    fn test_token_counts() {
        let output = tokenize("if a != 'b' then c -> 1.5 else d");
        let counts = get_token_counts(&output.tokens);

        assert_eq!(counts.total, 10);
        assert_eq!(counts.statements, 3);
        assert_eq!(counts.identifiers, 3);
        assert_eq!(counts.strings, 1);
        assert_eq!(counts.numbers, 1);
        assert_eq!(counts.symbols, 2);
        assert_eq!(counts.compound_operators, 2);
        assert_eq!(counts.literals(), 2);
        assert!(!get_token_counts(&[]).has_content());
    }

    #[test]
    fn test_output_serializes() {
        let output = tokenize_with_preferences("x '", quiet());
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["tokens"][0]["kind"], "Identifier");
        assert_eq!(value["tokens"][0]["value"], "x");
        assert_eq!(value["diagnostics"][0]["message"], "EOF WHILE PARSING STRING");
    }

    #[test]
    fn test_separator_set() {
        let output = tokenize_with_preferences("a\u{FEFF}b\u{3000}c", quiet());
        assert_eq!(
            summary(&output),
            expected(&[
                (TokenKind::Identifier, "a"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Identifier, "c"),
            ])
        );
        assert!(output.diagnostics.is_empty());

        let output = tokenize_with_preferences("a\u{85}b", quiet());
        assert_eq!(summary(&output), expected(&[(TokenKind::Identifier, "ab")]));
        assert_eq!(
            output.diagnostics[0].kind,
            Some(DiagnosticKind::UnrecognizedSyntax)
        );
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_claims_cover_strings() {
        let source = "x = 'a @b' '' 'c";
        let output = tokenize_with_preferences(source, quiet());

        assert_eq!(
            summary(&output),
            expected(&[
                (TokenKind::Identifier, "x"),
                (TokenKind::Symbol, "="),
                (TokenKind::String, "a b"),
                (TokenKind::String, ""),
            ])
        );
        assert_eq!(char_claims(source, &output), vec![1; source.chars().count()]);
    }

    /// Number of times each source char is claimed by a token, a diagnostic
    /// or whitespace skipping
    fn char_claims(source: &str, output: &TokenizeOutput) -> Vec<usize> {
        let mut chars = Vec::new();
        let mut position = Position::start();
        for ch in source.chars() {
            chars.push((position, ch));
            position = position.advance(ch);
        }

        let index_at = |line: u32, column: u32| {
            chars
                .iter()
                .position(|(p, _)| p.line == line && p.column == column)
        };
        let mut claims = vec![0; chars.len()];
        let mut dropped = vec![false; chars.len()];

        for diagnostic in &output.diagnostics {
            if diagnostic.kind == Some(DiagnosticKind::UnrecognizedSyntax) {
                if let Some(index) = index_at(diagnostic.line, diagnostic.column) {
                    claims[index] += 1;
                    dropped[index] = true;
                }
            }
        }

        for token in &output.tokens {
            let mut text = String::new();
            for (index, (p, ch)) in chars.iter().enumerate() {
                if token.span.contains(*p) && !dropped[index] {
                    claims[index] += 1;
                    text.push(*ch);
                }
            }

            // Only delimiters and dropped chars may differ from the value
            let value = match token.kind {
                TokenKind::String => format!("{}{}{}", QUOTE, token.value, QUOTE),
                _ => token.value.clone(),
            };
            assert_eq!(text, value, "token text at {}", token.span);
        }

        // An unterminated string swallows the rest of the input
        for diagnostic in &output.diagnostics {
            if diagnostic.kind == Some(DiagnosticKind::EofWhileParsingString) {
                if let Some(opening) = index_at(diagnostic.line, diagnostic.column) {
                    for index in opening..chars.len() {
                        if !dropped[index] {
                            claims[index] += 1;
                        }
                    }
                }
            }
        }

        for (index, (_, ch)) in chars.iter().enumerate() {
            if claims[index] == 0 && is_whitespace_char(*ch) {
                claims[index] = 1;
            }
        }

        claims
    }

    fn poco_source() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                4 => proptest::char::range('a', 'z'),
                3 => proptest::char::range('0', '9'),
                3 => proptest::sample::select(vec![
                    '+', '-', '/', '*', '%', '=', '>', '<', '!', '(', ')', '{', '}', '|', ',', '.',
                ]),
                2 => Just(QUOTE),
                2 => proptest::sample::select(vec![' ', '\t', '\n', '\r', '\u{FEFF}']),
                1 => proptest::sample::select(vec!['@', '#', '_', ';', 'é', '"', '\u{85}']),
            ],
            0..64,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    fn halting() -> LexicalPreferences {
        LexicalPreferences {
            recovery_policy: RecoveryPolicy::Halt,
            ..quiet()
        }
    }

    proptest! {
        #[test]
        fn prop_every_char_accounted_once(source in poco_source()) {
            let output = tokenize_with_preferences(&source, quiet());
            let claims = char_claims(&source, &output);

            prop_assert_eq!(claims, vec![1; source.chars().count()]);
        }

        #[test]
        fn prop_halt_matches_prefix(source in poco_source()) {
            let output = tokenize_with_preferences(&source, halting());

            let stop = source
                .char_indices()
                .find(|(_, ch)| classify_char(*ch) == CharacterClass::Unrecognized);

            match stop {
                None => {
                    prop_assert_eq!(output, tokenize_with_preferences(&source, quiet()));
                }
                Some((offset, _)) => {
                    // Same tokens as the prefix alone; any string cut off by the
                    // stop is dropped without its own diagnostic
                    let prefix = tokenize_with_preferences(&source[..offset], quiet());
                    prop_assert_eq!(&output.tokens, &prefix.tokens);
                    prop_assert_eq!(output.diagnostics.len(), 1);

                    let at = Position::start().advance_str(&source[..offset]);
                    prop_assert_eq!(
                        output.diagnostics[0].kind,
                        Some(DiagnosticKind::UnrecognizedSyntax)
                    );
                    prop_assert_eq!(output.diagnostics[0].position(), (at.line, at.column));

                    // Chars before the stop are claimed once, except the tail of
                    // a cut-off string; nothing is claimed twice
                    let stop_index = source[..offset].chars().count();
                    let cut_from = prefix
                        .diagnostics
                        .iter()
                        .find(|d| d.kind == Some(DiagnosticKind::EofWhileParsingString))
                        .and_then(|d| {
                            source
                                .chars()
                                .scan(Position::start(), |p, ch| {
                                    let here = *p;
                                    *p = p.advance(ch);
                                    Some(here)
                                })
                                .position(|p| p.line == d.line && p.column == d.column)
                        })
                        .unwrap_or(stop_index);

                    let claims = char_claims(&source, &output);
                    prop_assert_eq!(claims[stop_index], 1);
                    for (index, count) in claims.iter().enumerate() {
                        if index < cut_from {
                            prop_assert_eq!(*count, 1, "char {}", index);
                        } else {
                            prop_assert!(*count <= 1, "char {}", index);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_tokens_in_source_order(source in poco_source()) {
            let output = tokenize_with_preferences(&source, quiet());

            for pair in output.tokens.windows(2) {
                prop_assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
            }
            for token in output.tokens.iter().filter(|t| t.kind != TokenKind::String) {
                prop_assert!(!token.value.chars().any(is_whitespace_char));
            }
        }

        #[test]
        fn prop_never_panics(source in any::<String>()) {
            let output = tokenize_with_preferences(&source, quiet());
            prop_assert!(output.tokens.len() <= source.chars().count());
        }
    }
}
