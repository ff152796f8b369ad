//! Eventlog Core: shared abstractions.
//!
//! This crate defines the event type, the logging sink capability, and the
//! error types that the intake handler and sink implementations depend on.
//! It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod sink;
