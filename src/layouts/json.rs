//! JSON layout implementation
//!
//! One JSON object per record, shaped for log aggregation pipelines.

use crate::core::event::LoggingEvent;
use crate::core::layout::Layout;
use serde_json::json;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayout;

impl JsonLayout {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for JsonLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut record = json!({
            "timestamp": event.timestamp.to_rfc3339(),
            "level": event.level.as_str(),
            "logger": event.logger_name,
            "message": event.rendered_message,
            "thread": event.thread_label(),
        });
        let object = record
            .as_object_mut()
            .expect("record literal is an object");
        if !event.mdc.is_empty() {
            object.insert("mdc".to_string(), json!(event.mdc));
        }
        if !event.ndc.is_empty() {
            object.insert("ndc".to_string(), json!(event.ndc));
        }
        if let Some(location) = &event.location {
            object.insert(
                "location".to_string(),
                json!({
                    "module": location.module_path,
                    "file": location.file,
                    "line": location.line,
                }),
            );
        }
        record.to_string()
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}
