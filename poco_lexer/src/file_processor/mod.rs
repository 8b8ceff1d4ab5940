//! File processor module with compile-time limits
//!
//! Tokenization itself never touches the filesystem. This module is the
//! boundary that turns a path into validated UTF-8 source text.

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::lexical::{self, TokenizeOutput};

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, POCO_EXTENSION,
};

/// Process a file with environment-default preferences
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::from_preferences(&FileProcessorPreferences::default()).process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Tokenize an already-read file with the file name as log source context
pub fn tokenize_file_result(file_result: &FileProcessingResult) -> TokenizeOutput {
    let name = file_result.metadata.display_name();
    crate::logging::with_source_context(&name, || lexical::tokenize(&file_result.source))
}

/// Read and tokenize in one step
pub fn tokenize_file(file_path: &str) -> Result<TokenizeOutput, FileProcessorError> {
    let file_result = process_file(file_path)?;
    Ok(tokenize_file_result(&file_result))
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::tokens::TokenKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_tokenize_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("greet.poco");
        fs::write(&file_path, "let name = 'Po Co'\nreturn name\n").unwrap();

        let output = tokenize_file(file_path.to_str().unwrap()).unwrap();
        assert!(output.is_success());
        assert_eq!(output.tokens.len(), 6);
        assert_eq!(output.tokens[4].kind, TokenKind::Statement);
        assert_eq!(output.tokens[4].line(), 2);
    }

    #[test]
    fn test_tokenize_file_reports_diagnostics() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.poco");
        fs::write(&file_path, "let s = 'open\n").unwrap();

        let output = tokenize_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(output.tokens.len(), 3);
        assert_eq!(
            output.diagnostics[0].kind,
            Some(DiagnosticKind::EofWhileParsingString)
        );
    }

    #[test]
    fn test_tokenize_file_missing() {
        let result = tokenize_file("no/such/file.poco");
        assert!(matches!(result, Err(FileProcessorError::FileNotFound { .. })));
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(get_max_file_size(), FileProcessor::max_file_size());
        assert_eq!(get_large_file_threshold(), FileProcessor::large_file_threshold());
        assert_eq!(get_max_line_count(), FileProcessor::max_line_count());
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_poco_extension: true,
            enable_performance_logging: false,
        };
        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_poco_extension);
    }
}
