//! Inbound payload: one event or an ordered batch.

use eventlog_core::event::Event;
use serde::Deserialize;

/// The body of an intake request.
///
/// A JSON array decodes as `Batch`. Any other JSON value decodes as `Single`.
/// Batch elements are not inspected here, so a malformed element still reaches
/// the sink and is reported through `validCount`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntakePayload {
    /// An ordered sequence of events, processed left to right.
    Batch(Vec<Event>),
    /// A single event.
    Single(Event),
}

impl IntakePayload {
    /// Whether the payload was submitted as a batch.
    #[must_use]
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Number of events carried by the payload.
    #[must_use]
    pub fn event_count(&self) -> usize {
        match self {
            Self::Batch(events) => events.len(),
            Self::Single(_) => 1,
        }
    }
}
