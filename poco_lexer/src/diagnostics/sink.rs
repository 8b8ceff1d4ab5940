use super::{Diagnostic, DiagnosticSeverity};

/// Append-only destination for diagnostics of one tokenization run.
///
/// Implementations must keep entries in the order they were appended and must
/// not filter, merge or re-grade them.
pub trait DiagnosticSink {
    fn append(&mut self, diagnostic: Diagnostic);

    /// Everything recorded so far, oldest first
    fn diagnostics(&self) -> &[Diagnostic];
}

/// Plain vectors collect diagnostics too.
///
/// `vec.append(d)` resolves to the inherent `Vec::append`, so call through the
/// trait (`DiagnosticSink::append(&mut vec, d)`) or pass the vector to a
/// function generic over `DiagnosticSink`.
impl DiagnosticSink for Vec<Diagnostic> {
    fn append(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        self
    }
}

/// Vec-backed sink owned by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>, line: u32, column: u32) {
        self.append(Diagnostic::error(message, line, column));
    }

    pub fn log(&mut self, message: impl Into<String>, line: u32, column: u32) {
        self.append(Diagnostic::log(message, line, column));
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Drop all entries so the log can serve a fresh run
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn append(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a DiagnosticLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::utils::Position;

    #[test]
    fn test_entries_keep_append_order() {
        let mut log = DiagnosticLog::new();
        log.log("start", 1, 1);
        log.error("first", 1, 2);
        log.error("first", 1, 2);

        let messages: Vec<&str> = log.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["start", "first", "first"]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.error_count(), 2);
        assert!(log.has_errors());
    }

    #[test]
    fn test_log_entries_are_not_errors() {
        let mut log = DiagnosticLog::new();
        log.log("note", 3, 1);

        assert!(!log.is_empty());
        assert!(!log.has_errors());
        assert_eq!(log.error_count(), 0);
    }

    #[test]
    fn test_clear_and_into_vec() {
        let mut log = DiagnosticLog::new();
        log.append(Diagnostic::from_kind(
            DiagnosticKind::UnrecognizedSyntax,
            Position::start(),
        ));
        assert_eq!(log.diagnostics().len(), 1);

        log.clear();
        assert!(log.is_empty());

        log.error("again", 2, 2);
        let entries = log.into_vec();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 2);
    }

    #[test]
    fn test_vec_is_a_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        DiagnosticSink::append(&mut sink, Diagnostic::error("boom", 1, 1));
        DiagnosticSink::append(&mut sink, Diagnostic::log("note", 1, 2));

        let recorded = DiagnosticSink::diagnostics(&sink);
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].message, "boom");
        assert_eq!(recorded[1].column, 2);
    }

    #[test]
    fn test_vec_sink_through_tokenizer() {
        let mut sink: Vec<Diagnostic> = vec![Diagnostic::log("earlier", 9, 9)];
        let output = crate::lexical::tokenize_into("a @ b", &mut sink);

        assert_eq!(output.len(), 2);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].message, "earlier");
        assert_eq!(sink[1].kind, Some(DiagnosticKind::UnrecognizedSyntax));
    }
}
