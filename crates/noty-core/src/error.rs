//! Error types for the noty backend.

use thiserror::Error;

/// Result type alias using noty's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for noty operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (bad shape, size, or type)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique-key violation surfaced by the data backend
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// A remote service answered with an error status
    #[error("Remote service error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// HTTP/network request failed before a response arrived
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication failed or session is missing/expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
