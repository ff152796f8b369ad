//! Error types shared by the intake handler and sink implementations.

use thiserror::Error;

/// An event failed the sink's schema checks.
///
/// This is the only failure the intake handler recovers from. It is turned
/// into a `400` response and never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Create a validation error carrying a human-readable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable reason, or `None` when the sink gave no reason.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// The intake handler could not be constructed. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No logging sink was supplied.
    #[error("configuration error: a logging sink is required")]
    MissingSink,

    /// Deferred dispatch was requested outside of a Tokio runtime.
    #[error("configuration error: deferred dispatch requires a running Tokio runtime")]
    NoRuntime,
}
