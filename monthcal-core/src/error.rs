//! Error types for monthcal.

use thiserror::Error;

/// Errors that can occur in monthcal operations.
#[derive(Error, Debug)]
pub enum MonthCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM or YYYY-MM-DD")]
    InvalidMonth(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown color '{0}'. Expected one of: red, blue, green, yellow, purple")]
    InvalidColor(String),

    #[error("Unknown export format '{0}'. Expected json or csv")]
    InvalidFormat(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for monthcal operations.
pub type MonthCalResult<T> = Result<T, MonthCalError>;
