//! Error for the LNbits client

use sendsats_http_client::HttpError;
use thiserror::Error;

/// Result type for LNbits client operations
pub type Result<T> = std::result::Result<T, Error>;

/// LNbits Error
#[derive(Debug, Error)]
pub enum Error {
    /// LNbits answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        /// Raw response body
        message: String,
        /// HTTP status code
        status: u16,
    },
    /// Payment not made, e.g. self-payment or insufficient balance
    #[error("Payment rejected: {0}")]
    Rejected(String),
    /// Response lacks a field the call needs
    #[error("Response missing `{field}`: {body}")]
    MissingField {
        /// Expected field
        field: &'static str,
        /// Raw response body
        body: String,
    },
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),
    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
