//! Tracing subscriber and optional OpenTelemetry span export.

use std::fmt;

use eventlog_sink::EVENT_TARGET;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ApiConfig;
use crate::error::AppError;

/// Service name reported on exported spans.
pub const SERVICE_NAME: &str = "eventlog-api";

/// Handle to installed telemetry. Flushes exported spans on shutdown.
#[derive(Default)]
pub struct Telemetry {
    provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    /// Whether spans are exported over OTLP.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Flush and stop span export, if it was enabled.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "failed to shut down tracer provider");
            }
        }
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("exporting", &self.is_exporting())
            .finish()
    }
}

/// Filter directives used when `RUST_LOG` is unset: the configured level for
/// the server's own diagnostics, with logged events always let through.
#[must_use]
pub fn default_directives(log_level: &str) -> String {
    format!("{log_level},{EVENT_TARGET}=trace")
}

fn env_filter(log_level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(default_directives(log_level)).map_err(|e| {
            AppError::Config(format!("LOG_LEVEL is not a valid filter directive: {e}"))
        })
    })
}

/// Install the global tracing subscriber: JSON output filtered by
/// `RUST_LOG` or `LOG_LEVEL`, plus an OpenTelemetry layer when an OTLP
/// endpoint is configured.
///
/// # Errors
///
/// Returns `AppError::Config` for an invalid `LOG_LEVEL`, and
/// `AppError::Telemetry` if the exporter cannot be built or a global
/// subscriber is already installed.
pub fn init(config: &ApiConfig) -> Result<Telemetry, AppError> {
    let filter = env_filter(&config.log_level)?;
    let fmt_layer = tracing_subscriber::fmt::layer().json();

    let Some(endpoint) = &config.otlp_endpoint else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| AppError::Telemetry(e.to_string()))?;
        return Ok(Telemetry::default());
    };

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.clone())
        .build()
        .map_err(|e| AppError::Telemetry(format!("failed to build OTLP exporter: {e}")))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build();
    let tracer = provider.tracer(SERVICE_NAME);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))?;

    Ok(Telemetry {
        provider: Some(provider),
    })
}
