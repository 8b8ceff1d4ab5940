//! Log event destinations
//!
//! A [`LoggingService`] filters by level and hands accepted events to one
//! [`Logger`]. Everything the console sees goes to stderr so token output on
//! stdout stays machine-readable.

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for accepted events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a single logger
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Build the service described by the installed logging preferences
    pub fn from_preferences() -> Self {
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(NullLogger)
        } else if config::use_structured_logging() {
            Arc::new(StderrLogger::new(LogFormat::Json))
        } else {
            Arc::new(StderrLogger::new(LogFormat::Text))
        };

        Self::new(logger, config::get_min_log_level())
    }

    /// Lower levels are more severe, so `Error` passes every filter
    pub fn accepts(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.accepts(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Line format used by [`StderrLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct StderrLogger {
    format: LogFormat,
}

impl StderrLogger {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            LogFormat::Text => event.format(),
            // Fall back to text rather than lose the event
            LogFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        }
    }
}

impl Logger for StderrLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", self.render(event));
    }
}

pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Keeps every event it receives, for inspection in tests
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking test thread must not hide events from the others
    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.events().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    fn service_at(level: LogLevel) -> (Arc<MemoryLogger>, LoggingService) {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), level);
        (memory, service)
    }

    #[test]
    fn test_level_filter() {
        let (memory, service) = service_at(LogLevel::Warning);

        service.log_event(LogEvent::debug("scanning"));
        service.log_event(LogEvent::info("halfway"));
        service.log_event(LogEvent::warning_with_code(
            codes::warnings::HALTED_ON_DIAGNOSTIC,
            "halted",
        ));
        service.log_event(LogEvent::error(
            codes::lexical::UNRECOGNIZED_SYNTAX,
            "UNRECOGNIZED SYNTAX",
        ));

        let levels: Vec<LogLevel> = memory.get_events().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![LogLevel::Warning, LogLevel::Error]);
        assert!(service.accepts(LogLevel::Error));
        assert!(!service.accepts(LogLevel::Info));
    }

    #[test]
    fn test_memory_logger_keeps_order_and_context() {
        let (memory, service) = service_at(LogLevel::Debug);

        service.log_event(
            LogEvent::error(codes::lexical::EOF_WHILE_PARSING_STRING, "EOF WHILE PARSING STRING")
                .with_context("line", "3"),
        );
        service.log_event(LogEvent::success(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
        ));

        let events = memory.get_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].code, codes::lexical::EOF_WHILE_PARSING_STRING);
        assert_eq!(events[0].context.get("line").map(String::as_str), Some("3"));
        assert_eq!(events[1].code, codes::success::TOKENIZATION_COMPLETE);
    }

    #[test]
    fn test_stderr_logger_rendering() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "missing.poco")
            .with_context("path", "missing.poco");

        let text = StderrLogger::new(LogFormat::Text).render(&event);
        assert_eq!(text, "[ERROR] E005 - missing.poco");

        let json = StderrLogger::new(LogFormat::Json).render(&event);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "E005");
        assert_eq!(value["context"]["path"], "missing.poco");

        StderrLogger::new(LogFormat::Text).log(&event);
        NullLogger.log(&event);
    }
}
