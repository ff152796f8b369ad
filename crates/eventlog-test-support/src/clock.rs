//! Frozen clock for stamping events deterministically.

use chrono::{DateTime, Utc};
use eventlog_core::clock::Clock;

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// The `ts` string this clock stamps onto events.
    #[must_use]
    pub fn expected_timestamp(&self) -> String {
        self.timestamp()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
