//! Dispatch policy: how a validated event reaches `LoggingSink::log`.

use std::sync::Arc;

use eventlog_core::error::ConfigurationError;
use eventlog_core::event::Event;
use eventlog_core::sink::LoggingSink;
use tokio::runtime::Handle;

/// Whether `log` runs inline or on a detached task.
///
/// Validation and ordering are the same in both modes. Only the call to
/// `log` changes.
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// Call `log` on the request path and wait for it to return.
    Direct,
    /// Spawn `log` onto the captured runtime and never await it.
    Deferred(Handle),
}

impl Dispatch {
    /// Deferred dispatch bound to the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoRuntime` when called outside a Tokio
    /// runtime.
    pub fn deferred() -> Result<Self, ConfigurationError> {
        Handle::try_current()
            .map(Self::Deferred)
            .map_err(|_| ConfigurationError::NoRuntime)
    }

    /// Whether `log` calls are detached from the request.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Hand a validated event to the sink.
    ///
    /// A panic inside `log` unwinds into the caller in `Direct` mode. In
    /// `Deferred` mode it stays inside the spawned task.
    pub fn submit(&self, sink: &Arc<dyn LoggingSink>, event: Event) {
        match self {
            Self::Direct => sink.log(event),
            Self::Deferred(runtime) => {
                let sink = Arc::clone(sink);
                runtime.spawn(async move {
                    sink.log(event);
                });
            }
        }
    }
}
