//! Install the global tracing subscriber

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::format::FmtSpan, prelude::*, util::TryInitError, EnvFilter, Layer,
};

use crate::config::Config;

/// Only our own crates (and the request traces) are logged
const CRATE_FILTER: &str = "fitdesk,fitdesk_shared,fitdesk_components,fitdesk_server,tower_http";
const LOG_FILE_PREFIX: &str = "fitdesk.log";

/// Log to stdout and, if configured, to a daily rotated file
///
/// The returned guard flushes the file writer when dropped, so keep it alive until shutdown.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>, TryInitError> {
    let stdout = tracing_subscriber::fmt::layer()
        .compact()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_line_number(true)
        .with_filter(config.log_level);

    let (file, guard) = match &config.log_directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(config.log_level);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(CRATE_FILTER))
        .with(stdout)
        .with(file)
        .try_init()?;
    Ok(guard)
}
