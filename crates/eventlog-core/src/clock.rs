//! Time source used when stamping events.

use chrono::{DateTime, SecondsFormat, Utc};

/// Abstraction over system time so that event timestamps are reproducible in
/// tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as an RFC 3339 string with millisecond
    /// precision, the format written into an event's `ts` field.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
