//! HTTP request builder

use std::future::Future;

use serde::Serialize;

use crate::error::HttpError;
use crate::response::{RawResponse, Response};

/// Header and body setters shared by every request builder
pub trait RequestBuilderExt: Sized + Send {
    /// Add a header to the request
    fn header(self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self;

    /// Set the request body as JSON
    fn json<T: Serialize>(self, body: &T) -> Self;

    /// Set a raw request body, sent as-is
    fn body(self, body: impl Into<String>) -> Self;

    /// Send the request and return the response, whatever its status
    fn send(self) -> impl Future<Output = Response<RawResponse>> + Send;
}

/// Request builder for calls that need headers or a body
#[derive(Debug)]
pub struct RequestBuilder {
    inner: reqwest::RequestBuilder,
}

impl RequestBuilder {
    pub(crate) fn new(inner: reqwest::RequestBuilder) -> Self {
        Self { inner }
    }

    fn map(self, f: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder) -> Self {
        Self {
            inner: f(self.inner),
        }
    }
}

impl RequestBuilderExt for RequestBuilder {
    fn header(self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.map(|inner| inner.header(key.as_ref(), value.as_ref()))
    }

    fn json<T: Serialize>(self, body: &T) -> Self {
        self.map(|inner| inner.json(body))
    }

    fn body(self, body: impl Into<String>) -> Self {
        self.map(|inner| inner.body(body.into()))
    }

    async fn send(self) -> Response<RawResponse> {
        let response = self.inner.send().await.map_err(HttpError::from)?;
        Ok(RawResponse::new(response))
    }
}
