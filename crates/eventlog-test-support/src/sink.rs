//! Test sinks: mock `LoggingSink` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use eventlog_core::error::ValidationError;
use eventlog_core::event::Event;
use eventlog_core::sink::LoggingSink;

type Rule = Box<dyn Fn(&Event) -> Result<(), String> + Send + Sync>;

/// A sink that records every event passed to `log` and counts
/// `validate_event` calls.
///
/// By default an event is valid when it has a `tags` field, and invalid
/// events are rejected with `"tags is required"`.
pub struct RecordingSink {
    rule: Rule,
    validated: AtomicUsize,
    logged: Mutex<Vec<Event>>,
}

impl RecordingSink {
    /// Create a sink that requires a `tags` field.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rule(|event| {
            if event.field("tags").is_some() {
                Ok(())
            } else {
                Err("tags is required".to_owned())
            }
        })
    }

    /// Create a sink with a custom validation rule. An `Err` is reported
    /// as a `ValidationError` carrying the returned message.
    pub fn with_rule<F>(rule: F) -> Self
    where
        F: Fn(&Event) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            rule: Box::new(rule),
            validated: AtomicUsize::new(0),
            logged: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all logged events, in the order `log` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn logged_events(&self) -> Vec<Event> {
        self.logged.lock().unwrap().clone()
    }

    /// Number of `log` calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn log_count(&self) -> usize {
        self.logged.lock().unwrap().len()
    }

    /// Number of `validate_event` calls so far.
    pub fn validate_count(&self) -> usize {
        self.validated.load(Ordering::SeqCst)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingSink for RecordingSink {
    fn validate_event(&self, event: &Event) -> Result<(), ValidationError> {
        self.validated.fetch_add(1, Ordering::SeqCst);
        (self.rule)(event).map_err(ValidationError::new)
    }

    fn log(&self, event: Event) {
        self.logged.lock().unwrap().push(event);
    }
}

/// A sink that accepts every event and panics inside `log`. Useful for
/// checking that dispatch faults are not swallowed.
#[derive(Debug)]
pub struct PanickingSink {
    message: &'static str,
}

impl PanickingSink {
    /// Create a sink whose `log` panics with `message`.
    #[must_use]
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl LoggingSink for PanickingSink {
    fn validate_event(&self, _event: &Event) -> Result<(), ValidationError> {
        Ok(())
    }

    fn log(&self, _event: Event) {
        panic!("{}", self.message);
    }
}
