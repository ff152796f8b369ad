//! The intake handler.
//!
//! Events are processed strictly left to right. Each one is validated and,
//! if valid, dispatched before the next is looked at. The first invalid event
//! stops the batch. The number of events dispatched before it becomes the
//! rejection's `validCount`.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use eventlog_core::error::{ConfigurationError, ValidationError};
use eventlog_core::event::Event;
use eventlog_core::sink::LoggingSink;
use tracing::{debug, warn};

use crate::application::dispatch::Dispatch;
use crate::domain::outcome::{IntakeOutcome, Rejection};
use crate::domain::payload::IntakePayload;

/// Construction-time settings for an `IntakeHandler`.
///
/// `async_dispatch` defaults to `false`: `log` runs on the request path
/// unless deferred dispatch is asked for explicitly.
#[derive(Clone, Default)]
pub struct IntakeSettings {
    /// The sink every event is validated against and logged to. Required.
    pub logging_sink: Option<Arc<dyn LoggingSink>>,
    /// Spawn `log` calls instead of waiting for them.
    pub async_dispatch: bool,
}

impl IntakeSettings {
    /// Settings for the given sink with synchronous dispatch.
    #[must_use]
    pub fn new(logging_sink: Arc<dyn LoggingSink>) -> Self {
        Self {
            logging_sink: Some(logging_sink),
            async_dispatch: false,
        }
    }

    /// Choose between synchronous and deferred dispatch.
    #[must_use]
    pub fn with_async_dispatch(mut self, async_dispatch: bool) -> Self {
        self.async_dispatch = async_dispatch;
        self
    }
}

impl fmt::Debug for IntakeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeSettings")
            .field("logging_sink", &self.logging_sink.as_ref().map(|_| ".."))
            .field("async_dispatch", &self.async_dispatch)
            .finish()
    }
}

/// Where a batch stopped.
struct Halt {
    valid_count: usize,
    error: ValidationError,
}

/// Validates and dispatches the events of one request.
///
/// Holds no per-request state. One handler is shared by every request.
pub struct IntakeHandler {
    sink: Arc<dyn LoggingSink>,
    dispatch: Dispatch,
}

impl IntakeHandler {
    /// Build a handler from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingSink` if no sink was supplied, and
    /// `ConfigurationError::NoRuntime` if deferred dispatch was requested
    /// outside a Tokio runtime.
    pub fn new(settings: IntakeSettings) -> Result<Self, ConfigurationError> {
        let sink = settings
            .logging_sink
            .ok_or(ConfigurationError::MissingSink)?;
        let dispatch = if settings.async_dispatch {
            Dispatch::deferred()?
        } else {
            Dispatch::Direct
        };

        Ok(Self { sink, dispatch })
    }

    /// Whether `log` calls are detached from the response.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.dispatch.is_deferred()
    }

    /// Process one request payload.
    ///
    /// Validation failures become `IntakeOutcome::Rejected`. A panic raised by
    /// the sink's `log` is not caught.
    pub fn handle(&self, payload: IntakePayload) -> IntakeOutcome {
        match payload {
            IntakePayload::Single(event) => match self.process(std::iter::once(event)) {
                ControlFlow::Continue(_) => IntakeOutcome::Accepted,
                ControlFlow::Break(halt) => {
                    warn!(reason = %halt.error, "rejected event");
                    IntakeOutcome::Rejected(Rejection {
                        message: halt.error.message().map(str::to_owned),
                        valid_count: None,
                    })
                }
            },
            IntakePayload::Batch(events) => {
                let batch_size = events.len();
                match self.process(events) {
                    ControlFlow::Continue(valid_count) => {
                        debug!(valid_count, "accepted batch");
                        IntakeOutcome::Accepted
                    }
                    ControlFlow::Break(halt) => {
                        warn!(
                            reason = %halt.error,
                            valid_count = halt.valid_count,
                            batch_size,
                            "rejected batch"
                        );
                        IntakeOutcome::Rejected(Rejection {
                            message: halt.error.message().map(str::to_owned),
                            valid_count: Some(halt.valid_count),
                        })
                    }
                }
            }
        }
    }

    fn process(&self, events: impl IntoIterator<Item = Event>) -> ControlFlow<Halt, usize> {
        events
            .into_iter()
            .try_fold(0, |valid_count, event| match self.sink.validate_event(&event) {
                Ok(()) => {
                    debug!(index = valid_count, deferred = self.is_async(), "dispatching event");
                    self.dispatch.submit(&self.sink, event);
                    ControlFlow::Continue(valid_count + 1)
                }
                Err(error) => ControlFlow::Break(Halt { valid_count, error }),
            })
    }
}

impl fmt::Debug for IntakeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeHandler")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
