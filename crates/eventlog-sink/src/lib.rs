//! Eventlog Sink: the default `LoggingSink`.
//!
//! Used when the embedding application does not supply its own sink. Events
//! are checked against a small tag-based schema and written through
//! `tracing` at a level chosen from their tags.

pub mod schema;
pub mod service;

pub use service::{EVENT_TARGET, TracingLoggingService, TracingLoggingServiceBuilder};
