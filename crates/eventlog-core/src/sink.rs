//! Logging sink capability.

use crate::error::ValidationError;
use crate::event::Event;

/// A destination for validated events.
///
/// The intake handler always calls `validate_event` before `log`. Sinks are
/// shared across concurrent requests and, with deferred dispatch, across
/// spawned tasks, so implementations must be thread-safe.
pub trait LoggingSink: Send + Sync + 'static {
    /// Check an event against the sink's schema.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` describing the first rule the event breaks.
    fn validate_event(&self, event: &Event) -> Result<(), ValidationError>;

    /// Record an event. Durability and delivery are the sink's concern.
    fn log(&self, event: Event);
}
