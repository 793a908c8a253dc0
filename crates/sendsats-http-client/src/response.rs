//! HTTP response types

use crate::error::HttpError;

/// Result alias used by every HTTP operation
pub type Response<R, E = HttpError> = Result<R, E>;

/// HTTP response with status code and body access
///
/// The body is exposed whatever the status code. LNURL services report declared
/// failures as JSON bodies on 4xx responses, so callers decide how to treat the status.
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: response,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text
    pub async fn text(self) -> Response<String> {
        Ok(self.inner.text().await?)
    }

    /// Body as bytes
    pub async fn bytes(self) -> Response<Vec<u8>> {
        Ok(self.inner.bytes().await?.to_vec())
    }
}
