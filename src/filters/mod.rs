//! Filter implementations

pub mod level_match;
pub mod string_match;

pub use level_match::LevelMatchFilter;
pub use string_match::StringMatchFilter;

// Re-export the capability trait alongside its implementations
pub use crate::core::filter::{Filter, FilterDecision};

/// What a matching filter decides; non-matching events are always Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchAction {
    #[default]
    Accept,
    Deny,
}

impl MatchAction {
    pub(crate) fn decision(self) -> FilterDecision {
        match self {
            MatchAction::Accept => FilterDecision::Accept,
            MatchAction::Deny => FilterDecision::Deny,
        }
    }
}
