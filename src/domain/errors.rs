//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. Transport and
//! lookup failures are [`IiqError`] variants. Vendor payload parse failures
//! are a separate [`PayloadError`] that never escapes row building.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum IiqError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Incident IQ API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A value was missing from a fixed lookup table
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV output errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Incident IQ transport errors
///
/// Errors that occur when talking to the REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Failed to connect to {endpoint}: {message}")]
    ConnectionFailed { endpoint: String, message: String },

    /// The server answered with a non-success status
    #[error("Request to {endpoint} failed with status code {status}")]
    RequestFailed { status: u16, endpoint: String },

    /// The body could not be decoded
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

impl ApiError {
    /// Endpoint the failed request was sent to
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::ConnectionFailed { endpoint, .. }
            | ApiError::RequestFailed { endpoint, .. }
            | ApiError::InvalidResponse { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Vendor sub-payload parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The custom field value was not a JSON string
    #[error("{field}: value is not a string")]
    NotAString { field: String },

    /// The string did not parse as JSON
    #[error("{field}: malformed JSON: {message}")]
    Malformed { field: String, message: String },

    /// The array was empty (or the value was not an array)
    #[error("{field}: expected a non-empty array")]
    Empty { field: String },

    /// The first array element was not an object
    #[error("{field}: first element is not an object")]
    NotAnObject { field: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for IiqError {
    fn from(err: std::io::Error) -> Self {
        IiqError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for IiqError {
    fn from(err: serde_json::Error) -> Self {
        IiqError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for IiqError {
    fn from(err: toml::de::Error) -> Self {
        IiqError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for IiqError {
    fn from(err: csv::Error) -> Self {
        IiqError::Csv(err.to_string())
    }
}
