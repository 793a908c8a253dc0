//! Invoice negotiation against the LNURL-pay callback
//!
//! Selects the millisatoshi amount to request, calls the callback once and classifies the
//! answer. Negotiation never fails: every outcome is an [`InvoiceResult`].
//!
//! Callback bodies are classified with one precedence, in order:
//!
//! 1. not a JSON object → [`InvoiceResult::TransportError`]
//! 2. `status` is `"ERROR"` → [`InvoiceResult::Rejected`] with `reason`, or
//!    [`InvoiceResult::TransportError`] when no reason is given
//! 3. `pr` present → [`InvoiceResult::Invoice`]
//! 4. `reason` present → [`InvoiceResult::Rejected`]
//! 5. anything else → [`InvoiceResult::TransportError`]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::descriptor::{lnurl_error_reason, ServiceDescriptor};
use crate::amount::Amount;
use crate::error::{Error, INVOICE_FAILURE_MESSAGE};
use crate::transport::{LnurlTransport, LNURL_CONTENT_TYPE};

/// Outcome of a negotiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum InvoiceResult {
    /// BOLT11 invoice returned by the service
    Invoice(String),
    /// Service declined, with its human readable reason
    Rejected(String),
    /// Callback unreachable or answered with an unexpected shape
    TransportError(String),
}

impl InvoiceResult {
    /// The invoice, if negotiation succeeded
    pub fn invoice(&self) -> Option<&str> {
        match self {
            InvoiceResult::Invoice(bolt11) => Some(bolt11),
            _ => None,
        }
    }

    /// Text suitable for end users
    pub fn user_message(&self) -> &str {
        match self {
            InvoiceResult::Invoice(bolt11) => bolt11,
            InvoiceResult::Rejected(reason) => reason,
            InvoiceResult::TransportError(_) => INVOICE_FAILURE_MESSAGE,
        }
    }

    /// Convert into a `Result` for callers that want to use `?`
    pub fn into_result(self) -> Result<String, Error> {
        match self {
            InvoiceResult::Invoice(bolt11) => Ok(bolt11),
            InvoiceResult::Rejected(reason) => Err(Error::Rejected(reason)),
            InvoiceResult::TransportError(detail) => Err(Error::InvoiceUnavailable(detail)),
        }
    }

    /// Apply a case convention to the invoice, leaving failures untouched
    pub fn with_case(self, case: InvoiceCase) -> Self {
        match self {
            InvoiceResult::Invoice(bolt11) => InvoiceResult::Invoice(case.apply(&bolt11)),
            other => other,
        }
    }
}

/// Case applied to returned invoices
///
/// BOLT11 is case-insensitive. Uppercase lets QR encoders use the denser alphanumeric mode,
/// raw API passthrough keeps what the service sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceCase {
    /// Leave the invoice as received
    #[default]
    AsReceived,
    /// Uppercase the invoice
    Uppercase,
    /// Lowercase the invoice
    Lowercase,
}

impl InvoiceCase {
    /// Apply this convention to an invoice
    pub fn apply(&self, bolt11: &str) -> String {
        match self {
            InvoiceCase::AsReceived => bolt11.to_string(),
            InvoiceCase::Uppercase => bolt11.to_uppercase(),
            InvoiceCase::Lowercase => bolt11.to_lowercase(),
        }
    }
}

/// Wire shape of the LNURL-pay callback response
#[derive(Debug, Deserialize)]
struct CallbackResponse {
    pr: Option<String>,
    reason: Option<String>,
    #[serde(rename = "successAction")]
    success_action: Option<Value>,
}

/// Amount to request from the callback
///
/// The descriptor minimum, unless the caller asked for strictly more. An amount equal to the
/// minimum sends the minimum. The maximum is left for the service to enforce.
pub fn target_amount(descriptor: &ServiceDescriptor, amount_sats: Option<u64>) -> Amount {
    match amount_sats.map(Amount::from_sats) {
        Some(candidate) if candidate > descriptor.min_sendable => candidate,
        _ => descriptor.min_sendable,
    }
}

/// `{callback}?amount={msat}`, or `&amount=` when the callback already has a query
pub fn callback_url(callback: &str, amount: Amount) -> String {
    let separator = if callback.contains('?') { '&' } else { '?' };
    format!("{}{}amount={}", callback, separator, amount.msat())
}

/// Classify a callback response body
pub fn classify_callback_response(body: &[u8]) -> InvoiceResult {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("LNURL callback response is not JSON: {}", e);
            return InvoiceResult::TransportError(format!("response is not JSON: {e}"));
        }
    };

    if !value.is_object() {
        return InvoiceResult::TransportError("response is not a JSON object".to_string());
    }

    if value
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| status.eq_ignore_ascii_case("ERROR"))
    {
        return match lnurl_error_reason(&value) {
            Some(reason) => InvoiceResult::Rejected(reason.to_string()),
            None => InvoiceResult::TransportError("error status without a reason".to_string()),
        };
    }

    let response: CallbackResponse = match serde_json::from_value(value) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("LNURL callback response has unexpected fields: {}", e);
            return InvoiceResult::TransportError(e.to_string());
        }
    };

    if let Some(action) = response.success_action.as_ref() {
        tracing::debug!("Callback returned success action {}", action);
    }

    match (response.pr, response.reason) {
        (Some(pr), _) => InvoiceResult::Invoice(pr),
        (None, Some(reason)) => InvoiceResult::Rejected(reason),
        (None, None) => InvoiceResult::TransportError(
            "response contains neither an invoice nor a reason".to_string(),
        ),
    }
}

/// Request an invoice from the descriptor's callback
///
/// Non-idempotent: services usually mint a fresh invoice on each call.
#[instrument(skip(transport, descriptor), fields(callback = %descriptor.callback))]
pub async fn negotiate<T>(
    transport: &T,
    descriptor: &ServiceDescriptor,
    amount_sats: Option<u64>,
) -> InvoiceResult
where
    T: LnurlTransport + ?Sized,
{
    let amount = target_amount(descriptor, amount_sats);
    let url = callback_url(&descriptor.callback, amount);

    tracing::debug!("Requesting invoice for {} msat from {}", amount, url);

    let body = match transport
        .http_get(&url, &[("Content-Type", LNURL_CONTENT_TYPE)])
        .await
    {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("LNURL callback request failed: {}", e);
            return InvoiceResult::TransportError(e.to_string());
        }
    };

    let result = classify_callback_response(&body);
    if let InvoiceResult::Rejected(reason) = &result {
        tracing::info!("LNURL service rejected request: {}", reason);
    }

    result
}
