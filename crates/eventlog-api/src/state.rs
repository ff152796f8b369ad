//! Shared application state.

use std::sync::Arc;

use eventlog_intake::application::intake_handler::IntakeHandler;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The intake handler, built once at startup.
    pub intake: Arc<IntakeHandler>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(intake: Arc<IntakeHandler>) -> Self {
        Self { intake }
    }
}
