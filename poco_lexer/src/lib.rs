// Internal modules
pub mod config;
pub mod diagnostics;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink};
pub use lexical::{tokenize, tokenize_into, tokenize_with_preferences, TokenizeOutput};
pub use tokens::{Token, TokenKind, TokenStream};
