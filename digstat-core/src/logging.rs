use crate::conf::types::LoggingConfig;
use std::fs::{self, OpenOptions};
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - `RUST_LOG` wins; otherwise the configured level applies
/// - JSON output with flattened event fields
/// - Written to `logging.file` through a non-blocking appender when set, stdout otherwise
///
/// The returned guard flushes buffered lines on drop and must outlive the pipeline.
pub fn init_normal_logging(cfg: &LoggingConfig) -> io::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let Some(path) = &cfg.file else {
        fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

pub fn init_logging(cfg: &LoggingConfig) -> io::Result<Option<WorkerGuard>> {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
        Ok(None)
    } else {
        init_normal_logging(cfg)
    }
}

/// Plain stderr logging for short-lived commands (`config check`, `report`).
pub fn init_cli_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn init_console_logging() {
    console_subscriber::init();
}
