use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kidkeys={level},tower_http={level},warn")))
}

/// Console logging for `serve`.
pub fn init_console(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logger: {e}"))?;
    Ok(())
}

/// File logging for `play`, where the terminal belongs to the UI. The guard
/// flushes pending lines when dropped and must outlive the app.
pub fn init_file(dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, "kidkeys.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logger: {e}"))?;

    tracing::info!(dir = %dir.display(), "logging to file");
    Ok(guard)
}
