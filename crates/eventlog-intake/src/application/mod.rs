//! Intake handler and dispatch policy.

pub mod dispatch;
pub mod intake_handler;
