//! Eventlog Intake: the request-scoped core of the service.
//!
//! Accepts a single event or an ordered batch, validates each event against
//! the configured sink, dispatches valid events directly or on a deferred
//! Tokio task, and stops a batch at the first invalid event.

pub mod application;
pub mod domain;
