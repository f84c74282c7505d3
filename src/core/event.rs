//! Logging event structure
//!
//! A [`LoggingEvent`] is the immutable snapshot of one log call. It is built
//! once when a call passes the enablement check and is then shared by
//! reference with every appender in the cascade; nothing mutates it after
//! construction.

use super::context::{Mdc, Ndc};
use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache
            .as_ref()
            .expect("thread_name cache initialized in previous line")
            .clone()
    })
}

/// Source location of a log call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub module_path: String,
    pub file: String,
    pub line: u32,
}

impl LocationInfo {
    pub fn new(module_path: &str, file: &str, line: u32) -> Self {
        Self {
            module_path: module_path.to_string(),
            file: file.to_string(),
            line,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingEvent {
    pub logger_name: String,
    pub level: Level,
    /// The message exactly as the caller supplied it.
    pub message: String,
    /// The message with newlines, carriage returns, and tabs escaped.
    /// Layouts and sinks consume this form.
    pub rendered_message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub mdc: HashMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ndc: Vec<String>,
}

impl LoggingEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log records.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build an event for `logger_name`, snapshotting the calling thread's
    /// MDC and NDC.
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        let message = message.into();
        let rendered_message = Self::sanitize_message(&message);
        Self {
            logger_name: logger_name.into(),
            level,
            message,
            rendered_message,
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            location: None,
            mdc: Mdc::snapshot(),
            ndc: Ndc::snapshot(),
        }
    }

    pub fn with_location(mut self, location: LocationInfo) -> Self {
        self.location = Some(location);
        self
    }

    /// Thread label for output: the thread's name when it has one, else its id.
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_snapshot() {
        let event = LoggingEvent::new("app.db", Level::Info, "query ok");
        assert_eq!(event.logger_name, "app.db");
        assert_eq!(event.level, Level::Info);
        assert_eq!(event.message, "query ok");
        assert_eq!(event.rendered_message, "query ok");
        assert!(event.location.is_none());
    }

    #[test]
    fn test_message_sanitization() {
        let event = LoggingEvent::new(
            "app",
            Level::Info,
            "line one\nFAKE ERROR entry\r\tend",
        );
        assert_eq!(event.rendered_message, "line one\\nFAKE ERROR entry\\r\\tend");
        // The raw message is preserved untouched.
        assert!(event.message.contains('\n'));
    }

    #[test]
    fn test_with_location() {
        let event = LoggingEvent::new("app", Level::Warn, "x")
            .with_location(LocationInfo::new("app::server", "server.rs", 42));
        let location = event.location.unwrap();
        assert_eq!(location.module_path, "app::server");
        assert_eq!(location.file, "server.rs");
        assert_eq!(location.line, 42);
    }

    #[test]
    fn test_context_snapshots() {
        Mdc::clear();
        Ndc::clear();
        Mdc::put("request_id", "r-7");
        Ndc::push("handler");

        let event = LoggingEvent::new("app", Level::Debug, "in flight");
        assert_eq!(event.mdc.get("request_id").map(String::as_str), Some("r-7"));
        assert_eq!(event.ndc, vec!["handler".to_string()]);

        // Later context mutation must not affect the captured snapshot.
        Mdc::put("request_id", "r-8");
        Ndc::pop();
        assert_eq!(event.mdc.get("request_id").map(String::as_str), Some("r-7"));
        assert_eq!(event.ndc.len(), 1);

        Mdc::clear();
        Ndc::clear();
    }

    #[test]
    fn test_serializes_to_json() {
        let event = LoggingEvent::new("app", Level::Error, "boom");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"logger_name\":\"app\""));
        assert!(json.contains("\"Error\""));
    }
}
