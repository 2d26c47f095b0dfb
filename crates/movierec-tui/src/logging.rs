use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "movierec_core=info,movierec_tui=info";

/// `<data_dir>/movierec/logs`, or the temp dir when there is no data dir.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("movierec").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("movierec").join("logs"))
}

/// Route `tracing` output to a daily rolling file; the terminal belongs to
/// the UI. `RUST_LOG` overrides the default filter.
///
/// Keep the returned guard alive for the life of the process so buffered
/// lines are flushed.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("movierec")
        .filename_suffix("log")
        .build(&dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}
