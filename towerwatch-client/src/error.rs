//! Error types for the Towerwatch client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the tower controller
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Controller answered with a non-success status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        /// Endpoint the body came from
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// True when the body arrived but had the wrong shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
