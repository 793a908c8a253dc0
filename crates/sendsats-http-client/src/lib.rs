//! HTTP client abstraction for sendsats
//!
//! This crate wraps `reqwest` behind a small surface so that the LNURL engine and the
//! settlement client never depend on the HTTP library directly. Request timeouts and
//! proxies are configured once on the [`HttpClientBuilder`] by the host process.
//!
//! # Example
//!
//! ```no_run
//! use sendsats_http_client::{HttpClient, RequestBuilderExt, Response};
//!
//! async fn example() -> Response<Vec<u8>> {
//!     let client = HttpClient::new();
//!     let response = client
//!         .get("https://example.com/.well-known/lnurlp/alice")
//!         .header("Content-Type", "text/html; charset=UTF-8")
//!         .send()
//!         .await?;
//!     response.bytes().await
//! }
//! ```

mod client;
mod error;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use request::{RequestBuilder, RequestBuilderExt};
pub use response::{RawResponse, Response};
