//! Error types for the grantbridge core library.

use thiserror::Error;

/// Result type alias using the grantbridge core Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for grantbridge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Stored sequence could not be decoded
    #[error("Failed to decode stored sequence: {0}")]
    Encoding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
