//! HTTP client wrapper

use std::time::Duration;

use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::Response;

const USER_AGENT: &str = concat!("sendsats/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings and no timeout
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// GET request builder for custom headers
    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.get(url))
    }

    /// POST request builder for custom headers and bodies
    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.post(url))
    }
}

/// Builder for the request timeout and proxy
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    proxy: Option<url::Url>,
}

impl HttpClientBuilder {
    /// Bound the total duration of each request
    ///
    /// A hung remote would otherwise block the caller indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route every request through a proxy
    pub fn proxy(mut self, url: url::Url) -> Self {
        self.proxy = Some(url);
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| HttpError::Proxy(e.to_string()))?;
            tracing::debug!("Routing HTTP requests through {}", proxy_url);
            builder = builder.proxy(proxy);
        }

        Ok(HttpClient {
            inner: builder.build()?,
        })
    }
}
