//! Event intake API server entry point.

use std::error::Error;
use std::sync::Arc;

use eventlog_api::config::ApiConfig;
use eventlog_api::{build_app, telemetry};
use eventlog_core::sink::LoggingSink;
use eventlog_sink::TracingLoggingService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = ApiConfig::from_env()?;

    // Initialize tracing subscriber and optional span export.
    let telemetry = telemetry::init(&config)?;

    tracing::info!(
        route = %config.log_route_path,
        async_dispatch = config.async_dispatch,
        exporting_spans = telemetry.is_exporting(),
        "Starting event intake server"
    );

    let sink: Arc<dyn LoggingSink> = Arc::new(TracingLoggingService::new());
    let app = build_app(&config, sink)?;

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry.shutdown();

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
