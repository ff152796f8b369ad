//! `TracingLoggingService`: writes valid events through `tracing`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventlog_core::clock::{Clock, SystemClock};
use eventlog_core::error::ValidationError;
use eventlog_core::event::Event;
use eventlog_core::sink::LoggingSink;
use serde_json::Value;
use tracing::{Level, debug, error, info, trace, warn};

use crate::schema;

/// Target every logged event is written on.
pub const EVENT_TARGET: &str = "eventlog::event";

/// Called with each event after it has been logged.
pub type LogListener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Called with each event that `log` refused, and the reason.
pub type InvalidEventListener = Arc<dyn Fn(&Event, &ValidationError) + Send + Sync>;

/// Default sink. Validates against [`schema`], stamps a missing `ts`, and
/// emits the event on [`EVENT_TARGET`].
///
/// `log` re-validates, so events that bypass `validate_event` are counted
/// as invalid rather than written.
pub struct TracingLoggingService {
    clock: Arc<dyn Clock>,
    on_log: Option<LogListener>,
    on_invalid_event: Option<InvalidEventListener>,
    event_count: AtomicU64,
    invalid_event_count: AtomicU64,
}

impl TracingLoggingService {
    /// A service with the system clock and no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a service.
    #[must_use]
    pub fn builder() -> TracingLoggingServiceBuilder {
        TracingLoggingServiceBuilder::default()
    }

    /// Events written so far.
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::SeqCst)
    }

    /// Events refused by `log` so far.
    pub fn invalid_event_count(&self) -> u64 {
        self.invalid_event_count.load(Ordering::SeqCst)
    }

    fn reject(&self, event: &Event, reason: &ValidationError) {
        self.invalid_event_count.fetch_add(1, Ordering::SeqCst);
        warn!(reason = %reason, event = %event.as_value(), "dropping invalid event");
        if let Some(listener) = &self.on_invalid_event {
            listener(event, reason);
        }
    }

    fn stamp(&self, event: &mut Event) {
        if let Some(fields) = event.as_value_mut().as_object_mut() {
            fields
                .entry("ts")
                .or_insert_with(|| Value::String(self.clock.timestamp()));
        }
    }
}

impl Default for TracingLoggingService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TracingLoggingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingLoggingService")
            .field("event_count", &self.event_count())
            .field("invalid_event_count", &self.invalid_event_count())
            .finish_non_exhaustive()
    }
}

impl LoggingSink for TracingLoggingService {
    fn validate_event(&self, event: &Event) -> Result<(), ValidationError> {
        schema::validate(event)
    }

    fn log(&self, mut event: Event) {
        if let Err(reason) = schema::validate(&event) {
            self.reject(&event, &reason);
            return;
        }

        self.stamp(&mut event);
        self.event_count.fetch_add(1, Ordering::SeqCst);
        emit(&event);

        if let Some(listener) = &self.on_log {
            listener(&event);
        }
    }
}

fn emit(event: &Event) {
    let tags = schema::tags(event);
    let joined = tags.join(",");
    let payload = event.as_value();

    let level = schema::level(&tags);
    if level == Level::ERROR {
        error!(target: EVENT_TARGET, tags = %joined, event = %payload, "logged event");
    } else if level == Level::WARN {
        warn!(target: EVENT_TARGET, tags = %joined, event = %payload, "logged event");
    } else if level == Level::INFO {
        info!(target: EVENT_TARGET, tags = %joined, event = %payload, "logged event");
    } else if level == Level::DEBUG {
        debug!(target: EVENT_TARGET, tags = %joined, event = %payload, "logged event");
    } else {
        trace!(target: EVENT_TARGET, tags = %joined, event = %payload, "logged event");
    }
}

/// Builder for [`TracingLoggingService`].
#[derive(Default)]
pub struct TracingLoggingServiceBuilder {
    clock: Option<Arc<dyn Clock>>,
    on_log: Option<LogListener>,
    on_invalid_event: Option<InvalidEventListener>,
}

impl TracingLoggingServiceBuilder {
    /// Clock used to stamp events that arrive without a `ts`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Listener invoked after each event is written.
    #[must_use]
    pub fn on_log<F>(mut self, listener: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.on_log = Some(Arc::new(listener));
        self
    }

    /// Listener invoked for each event `log` refuses.
    #[must_use]
    pub fn on_invalid_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&Event, &ValidationError) + Send + Sync + 'static,
    {
        self.on_invalid_event = Some(Arc::new(listener));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> TracingLoggingService {
        TracingLoggingService {
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            on_log: self.on_log,
            on_invalid_event: self.on_invalid_event,
            event_count: AtomicU64::new(0),
            invalid_event_count: AtomicU64::new(0),
        }
    }
}
