//! Error types for the almanac core.

use thiserror::Error;

/// Errors that can occur in almanac operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event conflicts with existing event '{0}'")]
    Conflict(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for almanac operations.
pub type AlmanacResult<T> = Result<T, AlmanacError>;
