//! Position scanner: source text to classified, position-tagged characters

use super::analyzer::LexerError;
use super::classifier::{classify_char, CharacterClass};
use crate::config::runtime::RecoveryPolicy;
use crate::diagnostics::DiagnosticSink;
use crate::utils::{Position, Span};
use serde::Serialize;

/// A kept input character with its class and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedChar {
    pub class: CharacterClass,
    pub value: char,
    pub position: Position,
}

impl ClassifiedChar {
    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Position just past this character
    pub fn end(&self) -> Position {
        self.position.advance(self.value)
    }

    pub fn span(&self) -> Span {
        Span::single(self.position, self.value)
    }
}

/// Result of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub chars: Vec<ClassifiedChar>,
    /// Number of characters dropped as unrecognized
    pub unrecognized: usize,
    /// Where scanning stopped early under [`RecoveryPolicy::Halt`]
    pub halted_at: Option<Position>,
}

impl ScanOutput {
    pub fn halted(&self) -> bool {
        self.halted_at.is_some()
    }
}

/// Classifies every input character, dropping unrecognized ones into the sink
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionScanner {
    policy: RecoveryPolicy,
}

impl PositionScanner {
    pub fn new(policy: RecoveryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RecoveryPolicy {
        self.policy
    }

    pub fn scan<S>(&self, source: &str, sink: &mut S) -> ScanOutput
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut output = ScanOutput {
            chars: Vec::with_capacity(source.len()),
            ..ScanOutput::default()
        };
        let mut position = Position::start();

        for ch in source.chars() {
            match classify_char(ch) {
                CharacterClass::Unrecognized => {
                    output.unrecognized += 1;
                    sink.append(
                        LexerError::UnrecognizedSyntax {
                            character: ch,
                            line: position.line,
                            column: position.column,
                        }
                        .into(),
                    );

                    if self.policy == RecoveryPolicy::Halt {
                        output.halted_at = Some(position);
                        break;
                    }
                }
                class => output.chars.push(ClassifiedChar {
                    class,
                    value: ch,
                    position,
                }),
            }

            position = position.advance(ch);
        }

        output
    }
}
