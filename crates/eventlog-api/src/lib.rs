//! Event intake HTTP server.
//!
//! Exposes the intake handler as a `POST` route and a health check, wired
//! with the configuration, tracing, and middleware the binary uses.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use eventlog_core::sink::LoggingSink;
use eventlog_intake::application::intake_handler::{IntakeHandler, IntakeSettings};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::state::AppState;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

/// Build the application router around the given sink.
///
/// # Errors
///
/// Returns `AppError::Intake` if the intake handler cannot be constructed,
/// e.g. deferred dispatch requested outside a Tokio runtime.
pub fn build_app(config: &ApiConfig, sink: Arc<dyn LoggingSink>) -> Result<Router, AppError> {
    let settings = IntakeSettings::new(sink).with_async_dispatch(config.async_dispatch);
    let intake = IntakeHandler::new(settings)?;
    let app_state = AppState::new(Arc::new(intake));

    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::log::router(&config.log_route_path))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state))
}
