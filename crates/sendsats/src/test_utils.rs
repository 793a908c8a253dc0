#![cfg(test)]
#![allow(missing_docs)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use sendsats_http_client::HttpError;
use serde_json::Value;

use crate::amount::Amount;
use crate::lnurl::ServiceDescriptor;
use crate::transport::{LnurlTransport, LNURL_CONTENT_TYPE};

/// Build a descriptor without going through the wire format
pub fn descriptor(callback: &str, min_msat: u64, max_msat: u64) -> ServiceDescriptor {
    ServiceDescriptor {
        callback: callback.to_string(),
        min_sendable: Amount::from_msat(min_msat),
        max_sendable: Amount::from_msat(max_msat),
        metadata: Value::Null,
        comment_allowed: None,
        tag: Some("payRequest".to_string()),
    }
}

/// In-memory transport answering canned bodies per URL and recording requests
///
/// Bodies queued for one URL are served in order, the last one repeats. Unknown URLs fail
/// with a connection error.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Vec<u8>>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(body.as_bytes().to_vec());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LnurlTransport for MockTransport {
    async fn http_get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, HttpError> {
        assert!(
            headers.contains(&("Content-Type", LNURL_CONTENT_TYPE)),
            "LNURL requests must carry the LNURL content type"
        );
        self.requests.lock().unwrap().push(url.to_string());

        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(url)
            .ok_or_else(|| HttpError::Connection(format!("no route to {url}")))?;

        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        body.ok_or_else(|| HttpError::Connection(format!("nothing queued for {url}")))
    }
}
