use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bike sharing dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded into a record.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A `dteday` value was not a `YYYY-MM-DD` date.
    #[error("Invalid date '{value}' in {path} (row {row})")]
    DateParse {
        path: PathBuf,
        row: u64,
        value: String,
    },

    /// A menu key did not match any of the registered views.
    #[error("Unknown menu option: {0}")]
    UnknownMenuOption(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
