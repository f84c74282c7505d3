//! Filter capability and chain evaluation
//!
//! Each appender carries an ordered chain of filters. Evaluation walks the
//! chain in attachment order; the first `Accept` or `Deny` terminates it with
//! that result, and an empty or all-`Neutral` chain yields `Neutral`, which
//! the delivery path treats as accept.

use super::event::LoggingEvent;
use std::sync::Arc;

/// Tri-state decision returned by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Deliver the event immediately; remaining filters are skipped.
    Accept,
    /// Drop the event for this appender; remaining filters are skipped.
    Deny,
    /// No opinion; the next filter in the chain decides.
    Neutral,
}

pub trait Filter: Send + Sync {
    fn decide(&self, event: &LoggingEvent) -> FilterDecision;
}

/// Evaluate a filter chain in attachment order.
pub fn evaluate_chain(filters: &[Arc<dyn Filter>], event: &LoggingEvent) -> FilterDecision {
    for filter in filters {
        match filter.decide(event) {
            FilterDecision::Neutral => continue,
            decision => return decision,
        }
    }
    FilterDecision::Neutral
}
