use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "typing-speed.log";

/// Routes tracing output to `<dir>/typing-speed.log`. The terminal belongs to
/// the TUI, so nothing is written to stdout.
///
/// `RUST_LOG` wins over `default_filter`. Keep the returned guard alive for
/// the lifetime of the program or buffered lines are lost.
pub fn init(dir: &Path, default_filter: &str) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}
