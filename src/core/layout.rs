//! Layout capability
//!
//! A layout turns a [`LoggingEvent`] into one output record. Layouts return
//! the record without a trailing newline; sinks terminate records themselves.

use super::event::LoggingEvent;

pub trait Layout: Send + Sync {
    fn format(&self, event: &LoggingEvent) -> String;

    /// MIME type of the produced records.
    fn content_type(&self) -> &str {
        "text/plain"
    }
}
