//! HTTP error types

use thiserror::Error;

/// Errors raised while talking to a remote HTTP service
#[derive(Debug, Error)]
pub enum HttpError {
    /// Remote answered with a non-success status code
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
    /// Connection could not be established (DNS, refused, TLS)
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,
    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Proxy configuration error
    #[error("Proxy error: {0}")]
    Proxy(String),
    /// Client or request could not be built
    #[error("Client build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else if err.is_decode() {
            HttpError::Serialization(err.to_string())
        } else if let Some(status) = err.status() {
            HttpError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            HttpError::Other(err.to_string())
        }
    }
}
