use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user state directory under `$HOME`.
const APP_DIR: &str = ".bikeshare-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.bikeshare-dashboard`, or `./.bikeshare-dashboard` without a home dir.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Ensure `~/.bikeshare-dashboard/` and its `logs/` subdirectory exist.
///
/// Returns the application directory.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let dir = app_dir();
    std::fs::create_dir_all(dir.join("logs"))
        .with_context(|| format!("could not create {}", dir.display()))?;
    Ok(dir)
}

/// Log file used when `--log-file` is not given.
pub fn default_log_file(app_dir: &Path) -> PathBuf {
    app_dir.join("logs").join("bikeshare-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name onto an [`EnvFilter`] directive.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file`.
///
/// The terminal is owned by the dashboard while it runs, so log output never
/// goes to stderr.  Falls back to `"info"` if the level is not recognised.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("could not open log file {}", log_file.display()))?;

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
