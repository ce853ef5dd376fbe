//! Core error types for habitline-core.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for habitline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Instant is negative or not aligned to a calendar-day boundary.
    #[error("Invalid timestamp: {millis} ms is not a non-negative midnight instant")]
    InvalidTimestamp { millis: i64 },

    /// Frequency outside `0 < numerator <= denominator`.
    #[error("Invalid frequency: {numerator}/{denominator}")]
    InvalidFrequency { numerator: u32, denominator: u32 },

    /// Repetition store failures.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Storage-adapter errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database file.
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Could not resolve the platform data directory.
    #[error("Failed to access data directory")]
    DataDir,

    /// Habit lookup by id or name found nothing.
    #[error("Habit '{0}' not found")]
    HabitNotFound(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
