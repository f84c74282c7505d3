//! Exact-level match filter

use super::MatchAction;
use crate::core::event::LoggingEvent;
use crate::core::filter::{Filter, FilterDecision};
use crate::core::level::Level;

/// Accepts or denies events whose level equals `level` exactly; all other
/// events pass through as Neutral.
#[derive(Debug, Clone, Copy)]
pub struct LevelMatchFilter {
    level: Level,
    on_match: MatchAction,
}

impl LevelMatchFilter {
    pub fn new(level: Level, on_match: MatchAction) -> Self {
        Self { level, on_match }
    }
}

impl Filter for LevelMatchFilter {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision {
        if event.level == self.level {
            self.on_match.decision()
        } else {
            FilterDecision::Neutral
        }
    }
}
