//! Console sink implementation

use crate::core::appender::Sink;
use crate::core::error::Result;
use crate::core::event::LoggingEvent;
use crate::core::level::Level;
use colored::Colorize;

/// Writes records to stdout, routing Error and Fatal to stderr.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&mut self, rendered: &str, event: &LoggingEvent) -> Result<()> {
        let line = if self.use_colors {
            rendered.color(event.level.color_code()).to_string()
        } else {
            rendered.to_string()
        };
        match event.level {
            Level::Error | Level::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_does_not_fail() {
        let mut sink = ConsoleSink::with_colors(false);
        let event = LoggingEvent::new("app", Level::Info, "hello");
        sink.write("INFO - hello", &event).unwrap();
        sink.flush().unwrap();
    }

    #[test]
    fn test_requires_layout() {
        let sink = ConsoleSink::new();
        assert!(sink.requires_layout());
    }
}
