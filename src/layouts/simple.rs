//! Simple layout implementation

use crate::core::event::LoggingEvent;
use crate::core::layout::Layout;

/// The minimal `LEVEL - message` record.
///
/// # Example
///
/// ```
/// use cascade_log::core::event::LoggingEvent;
/// use cascade_log::core::layout::Layout;
/// use cascade_log::core::level::Level;
/// use cascade_log::layouts::SimpleLayout;
///
/// let event = LoggingEvent::new("app.db", Level::Debug, "query ok");
/// assert_eq!(SimpleLayout::new().format(&event), "DEBUG - query ok");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLayout;

impl SimpleLayout {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for SimpleLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        format!("{} - {}", event.level, event.rendered_message)
    }
}
