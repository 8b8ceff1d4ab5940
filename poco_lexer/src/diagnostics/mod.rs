//! Diagnostics produced during tokenization
//!
//! A tokenization run never fails; problems are appended to a caller-owned
//! [`DiagnosticSink`] and inspected after the run. An empty sink means success.

pub mod sink;

pub use sink::{DiagnosticLog, DiagnosticSink};

use crate::logging::codes::{self, Code};
use crate::utils::Position;
use serde::Serialize;
use std::fmt;

/// Entry type of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Informational entry
    Log,
    Error,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Log => "log",
            DiagnosticSeverity::Error => "error",
        }
    }
}

/// The failure conditions the lexer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// Character outside the Poco alphabet, dropped by the scanner
    UnrecognizedSyntax,
    /// Input ended inside a string literal
    EofWhileParsingString,
}

impl DiagnosticKind {
    /// Message text recorded in the sink
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnrecognizedSyntax => "UNRECOGNIZED SYNTAX",
            DiagnosticKind::EofWhileParsingString => "EOF WHILE PARSING STRING",
        }
    }

    pub fn code(&self) -> Code {
        match self {
            DiagnosticKind::UnrecognizedSyntax => codes::lexical::UNRECOGNIZED_SYNTAX,
            DiagnosticKind::EofWhileParsingString => codes::lexical::EOF_WHILE_PARSING_STRING,
        }
    }
}

/// One structured entry in a diagnostic sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Set for entries the lexer itself produces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosticKind>,
}

impl Diagnostic {
    /// Error entry for one of the lexer's failure conditions
    pub fn from_kind(kind: DiagnosticKind, position: Position) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: kind.message().to_string(),
            line: position.line,
            column: position.column,
            kind: Some(kind),
        }
    }

    pub fn error(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            line,
            column,
            kind: None,
        }
    }

    pub fn log(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            severity: DiagnosticSeverity::Log,
            message: message.into(),
            line,
            column,
            kind: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// Stable logging code, when the entry came from the lexer
    pub fn code(&self) -> Option<Code> {
        self.kind.map(|kind| kind.code())
    }

    pub fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -- line: {}, column: {}",
            self.message, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_log_format() {
        let diagnostic = Diagnostic::from_kind(
            DiagnosticKind::UnrecognizedSyntax,
            Position::new(7, 2, 3),
        );
        assert_eq!(
            diagnostic.to_string(),
            "UNRECOGNIZED SYNTAX -- line: 2, column: 3"
        );
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.code(), Some(codes::lexical::UNRECOGNIZED_SYNTAX));
    }

    #[test]
    fn test_log_entries_have_no_code() {
        let entry = Diagnostic::log("tokenizing sample", 1, 1);
        assert!(!entry.is_error());
        assert_eq!(entry.code(), None);
        assert_eq!(entry.severity.as_str(), "log");
    }

    #[test]
    fn test_serializes_kind_and_severity() {
        let diagnostic = Diagnostic::from_kind(
            DiagnosticKind::EofWhileParsingString,
            Position::new(0, 1, 1),
        );
        let value = serde_json::to_value(&diagnostic).unwrap();

        assert_eq!(value["severity"], "error");
        assert_eq!(value["message"], "EOF WHILE PARSING STRING");
        assert_eq!(value["kind"], "EOF_WHILE_PARSING_STRING");
        assert_eq!(value["line"], 1);

        let plain = serde_json::to_value(Diagnostic::log("note", 1, 1)).unwrap();
        assert!(plain.get("kind").is_none());
    }
}
