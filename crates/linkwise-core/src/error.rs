//! Error types for the Linkwise core library
//!
//! Fetch failures (`NotFound`, `Http`, `Transport`) are raised by the
//! innermost layer and travel through every enclosing layer untouched.
//! The normalizer itself never surfaces an error.

use thiserror::Error;

/// Main error type for Linkwise operations
#[derive(Error, Debug)]
pub enum Error {
    /// The requested resource does not exist upstream
    #[error("Resource not found: {key}")]
    NotFound { key: String },

    /// Non-success HTTP status other than 404
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Connection, timeout or other transport failure
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// An address could not be parsed into an absolute URL
    #[error("Malformed address '{address}': {source}")]
    MalformedAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error originated in a fetch layer
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::Http { .. } | Error::Transport { .. }
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::NotFound { .. } => Some(404),
            Error::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
