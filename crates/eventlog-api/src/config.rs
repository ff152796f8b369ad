//! Server configuration read from environment variables.

use std::net::SocketAddr;

use crate::error::AppError;

/// Route the intake endpoint is mounted on unless `LOG_ROUTE_PATH` is set.
pub const DEFAULT_LOG_ROUTE_PATH: &str = "/api/v1/log";

/// Largest accepted request body unless `MAX_BODY_BYTES` is set.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Path of the `POST` intake route (`LOG_ROUTE_PATH`).
    pub log_route_path: String,
    /// Detach `log` calls from the response (`ASYNC_DISPATCH`).
    pub async_dispatch: bool,
    /// Filter for the server's own diagnostics (`LOG_LEVEL`). `RUST_LOG`
    /// takes precedence when set.
    pub log_level: String,
    /// Request body limit in bytes (`MAX_BODY_BYTES`).
    pub max_body_bytes: usize,
    /// OTLP/gRPC collector for span export (`OTEL_EXPORTER_OTLP_ENDPOINT`).
    pub otlp_endpoint: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            log_route_path: DEFAULT_LOG_ROUTE_PATH.to_owned(),
            async_dispatch: true,
            log_level: "warn".to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            otlp_endpoint: None,
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Unset and blank variables fall
    /// back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };

        let log_route_path = get("LOG_ROUTE_PATH").unwrap_or(defaults.log_route_path);
        if !log_route_path.starts_with('/') {
            return Err(AppError::Config(format!(
                "LOG_ROUTE_PATH must start with '/': {log_route_path}"
            )));
        }

        let async_dispatch = match get("ASYNC_DISPATCH") {
            Some(value) => parse_flag("ASYNC_DISPATCH", &value)?,
            None => defaults.async_dispatch,
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(value) => value.trim().parse().map_err(|e| {
                AppError::Config(format!("MAX_BODY_BYTES must be a byte count: {e}"))
            })?,
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            log_route_path,
            async_dispatch,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            max_body_bytes,
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::Config(format!(
            "{key} must be true or false, got {other:?}"
        ))),
    }
}
