//! Request and response shapes for the intake endpoint.

pub mod outcome;
pub mod payload;
