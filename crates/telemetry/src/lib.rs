//! Logging bootstrap for BookBuddy.

use anyhow::anyhow;
use bookbuddy_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber according to the configured format.
///
/// `RUST_LOG` takes precedence over the default `info` filter.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(format = ?settings.log_format, "telemetry initialized");
    Ok(())
}
