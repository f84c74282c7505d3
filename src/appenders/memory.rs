//! In-memory sink implementation
//!
//! Captures records in a shared buffer. Used heavily by the crate's own
//! tests and useful anywhere output needs to be inspected programmatically.

use crate::core::appender::Sink;
use crate::core::error::Result;
use crate::core::event::LoggingEvent;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a [`MemorySink`]'s captured records.
#[derive(Clone, Default)]
pub struct MemoryBuffer {
    records: Arc<Mutex<Vec<String>>>,
}

impl MemoryBuffer {
    pub fn records(&self) -> Vec<String> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

pub struct MemorySink {
    buffer: MemoryBuffer,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            buffer: MemoryBuffer::default(),
        }
    }

    /// Handle for reading captured records after the sink has been moved
    /// into an appender.
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    /// A memory sink is usable without a layout; it then captures the
    /// rendered message verbatim.
    fn requires_layout(&self) -> bool {
        false
    }

    fn write(&mut self, rendered: &str, _event: &LoggingEvent) -> Result<()> {
        self.buffer.records.lock().push(rendered.to_string());
        Ok(())
    }
}
