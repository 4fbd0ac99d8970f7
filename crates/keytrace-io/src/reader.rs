//! I/O error types
//!
//! Every failure while fetching or parsing a dataset surfaces as an
//! `IoError`; charts render it as a terminal fallback.

use thiserror::Error;

/// Errors that can occur while loading datasets
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Load task failed: {0}")]
    Join(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for IoError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => IoError::OpenFailed(err.to_string()),
            _ => IoError::InvalidFormat(err.to_string()),
        }
    }
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
