//! Substring match filter

use super::MatchAction;
use crate::core::event::LoggingEvent;
use crate::core::filter::{Filter, FilterDecision};

/// Accepts or denies events whose rendered message contains `needle`; all
/// other events pass through as Neutral.
#[derive(Debug, Clone)]
pub struct StringMatchFilter {
    needle: String,
    on_match: MatchAction,
}

impl StringMatchFilter {
    pub fn new(needle: impl Into<String>, on_match: MatchAction) -> Self {
        Self {
            needle: needle.into(),
            on_match,
        }
    }
}

impl Filter for StringMatchFilter {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision {
        if event.rendered_message.contains(&self.needle) {
            self.on_match.decision()
        } else {
            FilterDecision::Neutral
        }
    }
}
