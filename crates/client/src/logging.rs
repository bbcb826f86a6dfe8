//! Logging to stderr and to a file under the platform cache directory.
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory.
///
/// - macOS: `~/Library/Caches/map-overlay/logs`
/// - Linux: `~/.cache/map-overlay/logs` (or `$XDG_CACHE_HOME/map-overlay/logs`)
/// - Windows: `%LOCALAPPDATA%\map-overlay\cache\logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "map-overlay")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("map-overlay"))
        .join("logs")
}

/// Install the global subscriber. `RUST_LOG` refines the default `info` level.
pub fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "overlay.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Keep the file writer alive for the life of the process.
    std::mem::forget(guard);

    tracing::info!("Log file: {}", log_dir.join("overlay.log").display());
    Ok(())
}
