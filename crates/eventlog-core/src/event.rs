//! The event record accepted by the intake endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One log entry as received over the wire.
///
/// The intake handler treats an event as opaque and passes it straight to the
/// sink. Only the sink's validation gives the fields any meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Value);

impl Event {
    /// Wrap a JSON value as an event.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Mutably borrow the underlying JSON value.
    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    /// Look up a top-level field. Returns `None` for non-object events.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|fields| fields.get(name))
    }
}
