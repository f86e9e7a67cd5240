//! Application errors.

use chromastat_core::CoreError;
use thiserror::Error;

/// Errors from the chromastat binary.
///
/// Acquisition and persistence errors are recovered close to where they
/// happen and end up in the report. The rest abort the command.
#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Reading a local document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PostgreSQL connection or query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An option value could not be used.
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
