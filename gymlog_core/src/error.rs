//! Error types for the gymlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gymlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Storage engine error (statement or transaction failure)
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested occurrence does not exist
    #[error("Occurrence {0} not found")]
    OccurrenceNotFound(i64),

    /// Requested workout definition does not exist
    #[error("Workout {0} not found")]
    WorkoutNotFound(i64),

    /// Requested exercise does not exist within any definition
    #[error("Exercise {0} not found")]
    ExerciseNotFound(i64),

    /// A buffered set failed the pre-commit checks
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Import document is structurally invalid
    #[error("Malformed workout document: {0}")]
    MalformedDocument(String),
}
