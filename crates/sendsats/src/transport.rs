//! HTTP transport used by the LNURL engine

use std::fmt::Debug;

use sendsats_http_client::{HttpClient, HttpError, RequestBuilderExt};

/// Content type sent on every LNURL request
///
/// LNURL servers negotiate loosely, this permissive value is what deployed services accept.
pub const LNURL_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// Expected HTTP transport for LNURL calls
///
/// Returns the raw body whatever the status code: LNURL services report declared failures
/// as JSON on 4xx responses and the engine classifies them itself.
#[async_trait::async_trait]
pub trait LnurlTransport: Debug + Send + Sync {
    /// HTTP GET returning the response body
    async fn http_get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, HttpError>;
}

#[async_trait::async_trait]
impl LnurlTransport for HttpClient {
    async fn http_get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, HttpError> {
        let mut request = self.get(url);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        response.bytes().await
    }
}
