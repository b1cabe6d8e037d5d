//! Error types for calwatch.

use thiserror::Error;

/// Errors that can occur in calwatch operations.
///
/// Extraction never produces these: a document that does not contain a
/// calendar is a normal outcome, not an error.
#[derive(Error, Debug)]
pub enum CalWatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalWatchError {
    fn from(e: serde_json::Error) -> Self {
        CalWatchError::Serialization(e.to_string())
    }
}

/// Result type alias for calwatch operations.
pub type CalWatchResult<T> = Result<T, CalWatchError>;
