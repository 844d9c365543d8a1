use std::io::Write;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::{AppConfig, LogFormat},
    errors::server_error::ServerError,
};

const DEFAULT_FILTER: &str = "ping_echo_api=info,tower_http=info";

/// Keeps logging alive for as long as it is held. Dropping it writes a last
/// line and flushes stdout, so hold it until the process is about to exit.
#[must_use = "logging is flushed when the guard is dropped"]
pub struct TelemetryGuard {
    _private: (),
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        info!("Logger shutting down.");
        let _ = std::io::stdout().flush();
    }
}

/// Installs the process-wide subscriber. `RUST_LOG` overrides the default
/// filter.
///
/// # Errors
/// Fails if a subscriber has already been installed.
pub fn init(config: &AppConfig) -> Result<TelemetryGuard, ServerError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.log_format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    installed.map_err(|err| ServerError::Telemetry(err.to_string()))?;

    Ok(TelemetryGuard { _private: () })
}
