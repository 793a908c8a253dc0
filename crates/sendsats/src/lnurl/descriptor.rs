//! LNURL-pay service descriptor
//!
//! The first LNURL-pay step: GET the well-known URL and validate the JSON
//! `payRequest` it returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::amount::Amount;
use crate::error::Error;
use crate::transport::{LnurlTransport, LNURL_CONTENT_TYPE};

/// Wire shape of the LNURL-pay response from the well-known endpoint
#[derive(Debug, Deserialize)]
struct LnurlPayResponse {
    callback: String,
    #[serde(rename = "minSendable")]
    min_sendable: u64,
    #[serde(rename = "maxSendable")]
    max_sendable: Option<u64>,
    #[serde(default)]
    metadata: Value,
    #[serde(rename = "commentAllowed")]
    comment_allowed: Option<u64>,
    tag: Option<String>,
}

/// Validated LNURL-pay service descriptor
///
/// Always satisfies `0 < min_sendable <= max_sendable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Callback URL that mints invoices
    pub callback: String,
    /// Minimum amount the service accepts
    pub min_sendable: Amount,
    /// Maximum amount the service accepts
    pub max_sendable: Amount,
    /// Opaque metadata (usually a JSON-stringified array of `[mime, value]` pairs)
    pub metadata: Value,
    /// Maximum comment length, if comments are accepted
    pub comment_allowed: Option<u64>,
    /// Request tag, `payRequest` for conforming services
    pub tag: Option<String>,
}

impl ServiceDescriptor {
    /// Parse and validate a descriptor from a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::InvalidDescriptor(format!("response is not JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::InvalidDescriptor(
                "response is not a JSON object".to_string(),
            ));
        }

        if let Some(reason) = lnurl_error_reason(&value) {
            return Err(Error::InvalidDescriptor(format!(
                "service returned an error: {reason}"
            )));
        }

        let response: LnurlPayResponse =
            serde_json::from_value(value).map_err(|e| Error::InvalidDescriptor(e.to_string()))?;

        if response.min_sendable == 0 {
            return Err(Error::InvalidDescriptor(
                "minSendable must be positive".to_string(),
            ));
        }

        // Services that omit maxSendable only accept a fixed amount
        let max_sendable = response.max_sendable.unwrap_or(response.min_sendable);
        if response.min_sendable > max_sendable {
            return Err(Error::InvalidDescriptor(format!(
                "minSendable {} exceeds maxSendable {}",
                response.min_sendable, max_sendable
            )));
        }

        if let Some(tag) = response.tag.as_deref() {
            if tag != "payRequest" {
                tracing::warn!("LNURL descriptor has unexpected tag {}", tag);
            }
        }

        Ok(Self {
            callback: response.callback,
            min_sendable: Amount::from_msat(response.min_sendable),
            max_sendable: Amount::from_msat(max_sendable),
            metadata: response.metadata,
            comment_allowed: response.comment_allowed,
            tag: response.tag,
        })
    }

    /// Minimum in whole sats, as shown to payers
    pub fn min_sats(&self) -> u64 {
        self.min_sendable.sats_floor()
    }

    /// Maximum in whole sats, as shown to payers
    pub fn max_sats(&self) -> u64 {
        self.max_sendable.sats_floor()
    }
}

/// `reason` of an LNURL error body (`{"status": "ERROR", "reason": ...}`)
pub(crate) fn lnurl_error_reason(value: &Value) -> Option<&str> {
    let status = value.get("status")?.as_str()?;
    if status.eq_ignore_ascii_case("ERROR") {
        value.get("reason").and_then(Value::as_str)
    } else {
        None
    }
}

/// Fetch the LNURL-pay descriptor from `url`
///
/// A single GET, no retry.
#[instrument(skip(transport))]
pub async fn fetch_descriptor<T>(transport: &T, url: &str) -> Result<ServiceDescriptor, Error>
where
    T: LnurlTransport + ?Sized,
{
    tracing::debug!("Fetching LNURL-pay descriptor");

    let body = transport
        .http_get(url, &[("Content-Type", LNURL_CONTENT_TYPE)])
        .await?;

    let descriptor = ServiceDescriptor::from_slice(&body)?;

    tracing::debug!(
        "Descriptor callback {} accepts {} to {} msat",
        descriptor.callback,
        descriptor.min_sendable,
        descriptor.max_sendable
    );

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let body = br#"{
            "callback": "https://x/cb",
            "minSendable": 100000,
            "maxSendable": 500000,
            "metadata": "[[\"text/plain\",\"Tips\"]]",
            "commentAllowed": 255,
            "tag": "payRequest"
        }"#;

        let descriptor = ServiceDescriptor::from_slice(body).unwrap();
        assert_eq!(descriptor.callback, "https://x/cb");
        assert_eq!(descriptor.min_sendable, Amount::from_msat(100_000));
        assert_eq!(descriptor.max_sendable, Amount::from_msat(500_000));
        assert_eq!(descriptor.comment_allowed, Some(255));
        assert_eq!(descriptor.min_sats(), 100);
        assert_eq!(descriptor.max_sats(), 500);
    }

    #[test]
    fn test_missing_max_sendable_is_fixed_amount() {
        let descriptor =
            ServiceDescriptor::from_slice(br#"{"callback":"https://x/cb","minSendable":1000}"#)
                .unwrap();
        assert_eq!(descriptor.max_sendable, descriptor.min_sendable);
        assert_eq!(descriptor.metadata, Value::Null);
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            &br#"{"minSendable":1000,"maxSendable":2000}"#[..],
            &br#"{"callback":"https://x/cb","maxSendable":2000}"#[..],
            &br#"{"callback":"https://x/cb","minSendable":"1000"}"#[..],
        ] {
            assert!(matches!(
                ServiceDescriptor::from_slice(body),
                Err(Error::InvalidDescriptor(_))
            ));
        }
    }

    #[test]
    fn test_not_json_or_not_object() {
        for body in [
            &b"<html>404</html>"[..],
            &b"[1, 2]"[..],
            &b"\"x\""[..],
            &b""[..],
        ] {
            assert!(matches!(
                ServiceDescriptor::from_slice(body),
                Err(Error::InvalidDescriptor(_))
            ));
        }
    }

    #[test]
    fn test_bounds_invariant() {
        let inverted = br#"{"callback":"https://x/cb","minSendable":5000,"maxSendable":1000}"#;
        let zero = br#"{"callback":"https://x/cb","minSendable":0,"maxSendable":1000}"#;
        assert!(ServiceDescriptor::from_slice(inverted).is_err());
        assert!(ServiceDescriptor::from_slice(zero).is_err());
    }

    #[test]
    fn test_error_body_reason_is_reported() {
        let body = br#"{"status":"ERROR","reason":"User not found"}"#;
        match ServiceDescriptor::from_slice(body) {
            Err(Error::InvalidDescriptor(msg)) => assert!(msg.contains("User not found")),
            other => panic!("Expected InvalidDescriptor, got {other:?}"),
        }
    }
}
