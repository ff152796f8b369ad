//! Shared test sinks and utilities for the event intake service.

mod clock;
mod sink;

pub use clock::FixedClock;
pub use sink::{PanickingSink, RecordingSink};
