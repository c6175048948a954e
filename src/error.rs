//! Error types for catalog processing.
//!
//! Every variant is fatal to the current run. The binary wraps these
//! with `anyhow` context and maps them to a non-zero exit status.

use std::path::PathBuf;

/// Errors raised while reading, aggregating, or writing study data.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Row {row} is missing required field '{field}'")]
    MissingField { field: &'static str, row: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid count '{value}' for phase '{phase}'")]
    InvalidCount { phase: String, value: String },
}

impl StatsError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
