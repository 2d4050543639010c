//! Installs the global `tracing` subscriber.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use super::config::{Log, LogConsole, LogFormat};

/// Sets up console logging and returns the guard that flushes the
/// non-blocking writer. Keep the guard alive for the life of the process.
///
/// Returns `Ok(None)` when console logging is disabled.
pub fn setup(
    config: &Log,
) -> Result<Option<WorkerGuard>, tracing_subscriber::util::TryInitError> {
    let console = &config.console;
    if !console.enabled {
        return Ok(None);
    }

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let subscriber = tracing_subscriber::registry().with(console_filter(console));

    match console.log_format {
        LogFormat::Default => subscriber
            .with(fmt::layer().with_target(true).with_writer(writer))
            .try_init()?,
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init()?,
    }

    tracing::debug!(level = %console.level.into_level(), "logger initialized");
    Ok(Some(guard))
}

fn console_filter(console: &LogConsole) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(console.level.into_level()).into())
        .parse_lossy(console.filtering_directive.as_deref().unwrap_or_default())
}
