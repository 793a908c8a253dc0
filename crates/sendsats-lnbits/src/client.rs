//! HTTP client for the LNbits payments API

use std::future::Future;

use sendsats_http_client::{HttpClient, RawResponse, RequestBuilder, RequestBuilderExt};
use serde_json::Value;
use tracing::instrument::WithSubscriber;
use tracing::{instrument, Dispatch};

use crate::error::{Error, Result};
use crate::types::{DecodeRequest, PayRequest, PaymentReceipt, PaymentStatus};

/// LNbits payments API client
///
/// `base_url` is the payments endpoint, e.g. `https://legend.lnbits.com/api/v1/payments`.
#[derive(Clone)]
pub struct LNbitsClient {
    base_url: String,
    invoice_key: String,
    admin_key: String,
    http_client: HttpClient,
    dispatch: Option<Dispatch>,
}

impl std::fmt::Debug for LNbitsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LNbitsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LNbitsClient {
    /// Create a new LNbits client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Payments endpoint, a trailing `/` is ignored
    /// * `invoice_key` - Invoice/read key, used for decode and status checks
    /// * `admin_key` - Admin key, used for payments
    pub fn new(
        base_url: &str,
        invoice_key: impl Into<String>,
        admin_key: impl Into<String>,
    ) -> Result<Self> {
        url::Url::parse(base_url)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            invoice_key: invoice_key.into(),
            admin_key: admin_key.into(),
            http_client: HttpClient::new(),
            dispatch: None,
        })
    }

    /// Use a preconfigured HTTP client (timeouts, proxy)
    pub fn with_http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = http_client;
        self
    }

    /// Log through `dispatch` rather than the global subscriber
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Payments endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode an invoice and return its payment hash
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if LNbits could not decode the invoice
    pub async fn decode_to_payment_hash(&self, bolt11: &str) -> Result<String> {
        self.in_scope(async { self.decode_inner(bolt11).await })
            .await
    }

    #[instrument(skip(self))]
    async fn decode_inner(&self, bolt11: &str) -> Result<String> {
        let url = format!("{}/decode", self.base_url);

        let response = self
            .authorized(self.http_client.post(&url), &self.invoice_key)
            .json(&DecodeRequest { data: bolt11 })
            .send()
            .await?;

        let (body, text) = Self::parse_response(response).await?;

        let Some(payment_hash) = body.get("payment_hash").and_then(Value::as_str) else {
            return Err(Error::MissingField {
                field: "payment_hash",
                body: text,
            });
        };

        tracing::info!("Decoded payment hash {}", payment_hash);
        Ok(payment_hash.to_string())
    }

    /// Check whether the payment with `payment_hash` has been settled
    pub async fn check_status(&self, payment_hash: &str) -> Result<PaymentStatus> {
        self.in_scope(async { self.check_status_inner(payment_hash).await })
            .await
    }

    #[instrument(skip(self))]
    async fn check_status_inner(&self, payment_hash: &str) -> Result<PaymentStatus> {
        let url = format!("{}/{}", self.base_url, payment_hash);

        let response = self
            .authorized(self.http_client.get(&url), &self.invoice_key)
            .send()
            .await?;

        let (body, _) = Self::parse_response(response).await?;
        let status: PaymentStatus = serde_json::from_value(body)?;

        tracing::debug!("Payment {} paid: {}", payment_hash, status.paid);
        Ok(status)
    }

    /// Pay an invoice from the wallet
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-2xx status and [`Error::Rejected`] when LNbits answers
    /// without a payment hash (self-payment, insufficient balance). Both carry the raw body.
    pub async fn pay_invoice(&self, bolt11: &str) -> Result<PaymentReceipt> {
        self.in_scope(async { self.pay_invoice_inner(bolt11).await })
            .await
    }

    #[instrument(skip(self))]
    async fn pay_invoice_inner(&self, bolt11: &str) -> Result<PaymentReceipt> {
        let body = serde_json::to_string(&PayRequest { out: true, bolt11 })?;

        let response = self
            .authorized(self.http_client.post(&self.base_url), &self.admin_key)
            .body(body)
            .send()
            .await?;

        let (raw, text) = Self::parse_response(response).await?;

        let Some(payment_hash) = raw.get("payment_hash").and_then(Value::as_str) else {
            tracing::warn!("Payment not made: {}", text);
            return Err(Error::Rejected(text));
        };

        let receipt = PaymentReceipt {
            payment_hash: payment_hash.to_string(),
            checking_id: raw
                .get("checking_id")
                .and_then(Value::as_str)
                .map(str::to_string),
            raw,
        };

        tracing::info!("Paid invoice, payment hash {}", receipt.payment_hash);
        Ok(receipt)
    }

    fn authorized(&self, request: RequestBuilder, key: &str) -> RequestBuilder {
        request
            .header("X-Api-Key", key)
            .header("Content-Type", "application/json")
    }

    /// Read the body, failing on non-2xx statuses
    async fn parse_response(response: RawResponse) -> Result<(Value, String)> {
        let status = response.status();
        let success = response.is_success();
        let text = response.text().await?;

        if !success {
            tracing::debug!("Error response ({}): {}", status, text);
            return Err(Error::Api {
                message: text,
                status,
            });
        }

        let value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("JSON parse error: {} - Body: {}", e, text);
            e
        })?;

        Ok((value, text))
    }

    async fn in_scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        match &self.dispatch {
            Some(dispatch) => future.with_subscriber(dispatch.clone()).await,
            None => future.await,
        }
    }
}
