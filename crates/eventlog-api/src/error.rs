//! Startup errors for the API server.

use eventlog_core::error::ConfigurationError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The intake handler rejected its settings.
    #[error(transparent)]
    Intake(#[from] ConfigurationError),

    /// Tracing or OpenTelemetry could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
