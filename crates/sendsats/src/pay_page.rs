//! Everything a payment page shows for one address

use std::str::FromStr;

use serde::Serialize;

use crate::amount::Amount;
use crate::error::Error;
use crate::lightning_address::LightningAddress;
use crate::lnurl::{target_amount, InvoiceCase, ServiceDescriptor};
use crate::qr::{self, PayloadConvention, RenderOptions};
use crate::resolver::Resolver;
use crate::transport::LnurlTransport;

/// Data for a payment page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayPage {
    /// Address as given by the payer
    pub address: String,
    /// LNURL-pay URL of the address
    pub lnurlp_url: String,
    /// Descriptor the invoice was negotiated against
    pub descriptor: ServiceDescriptor,
    /// Minimum in whole sats
    pub min_sats: u64,
    /// Maximum in whole sats
    pub max_sats: u64,
    /// Amount requested from the callback
    pub amount: Amount,
    /// Invoice, lowercase
    pub bolt11: String,
    /// SVG markup of `lightning:<INVOICE>`, sized by its container
    pub svg: String,
    /// PNG of `lightning:<INVOICE>` as a `data:` URI
    pub png_data_uri: String,
}

impl PayPage {
    /// Render both QR codes for an invoice negotiated against `descriptor`
    pub fn render(
        address: &LightningAddress,
        descriptor: ServiceDescriptor,
        amount: Amount,
        bolt11: &str,
        options: &RenderOptions,
    ) -> Result<Self, Error> {
        // Uppercase keeps the symbol in alphanumeric mode
        let payload = PayloadConvention::LightningUri.apply(&InvoiceCase::Uppercase.apply(bolt11));

        let svg = qr::render_vector(&payload, options)?;
        let png = qr::render_raster(&payload, options)?;

        Ok(Self {
            address: address.to_string(),
            lnurlp_url: address.lnurlp_url(),
            min_sats: descriptor.min_sats(),
            max_sats: descriptor.max_sats(),
            descriptor,
            amount,
            bolt11: InvoiceCase::Lowercase.apply(bolt11),
            svg,
            png_data_uri: qr::png_data_uri(&png),
        })
    }
}

impl<T> Resolver<T>
where
    T: LnurlTransport,
{
    /// Fetch, negotiate and render a payment page for `address`
    ///
    /// The descriptor is fetched once and reused for negotiation. Rejections and transport
    /// errors from the callback are returned as `Err`.
    pub async fn pay_page(
        &self,
        address: &str,
        amount_sats: Option<u64>,
        options: &RenderOptions,
    ) -> Result<PayPage, Error> {
        let parsed = LightningAddress::from_str(address)?;
        let descriptor = self.fetch_descriptor(address).await?;

        let bolt11 = self
            .resolve_invoice_with(address, amount_sats, Some(&descriptor))
            .await?
            .into_result()?;

        let amount = target_amount(&descriptor, amount_sats);

        self.in_scope(async {
            tracing::debug!("Rendering pay page for {}", parsed);
            PayPage::render(&parsed, descriptor, amount, &bolt11, options)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVOICE_FAILURE_MESSAGE;
    use crate::test_utils::MockTransport;

    fn resolver(callback_body: &str) -> Resolver<MockTransport> {
        let transport = MockTransport::new();
        transport.respond(
            "https://x/.well-known/lnurlp/user",
            r#"{"callback":"https://x/cb","minSendable":1000,"maxSendable":1000000000}"#,
        );
        transport.respond("https://x/cb?amount=21000", callback_body);
        Resolver::with_transport(transport)
    }

    #[tokio::test]
    async fn test_pay_page() {
        let resolver = resolver(r#"{"pr":"LNBC210N1PJQQQ"}"#);

        let page = resolver
            .pay_page("user@x", Some(21), &RenderOptions::default())
            .await
            .unwrap();

        assert_eq!(page.lnurlp_url, "https://x/.well-known/lnurlp/user");
        assert_eq!(page.bolt11, "lnbc210n1pjqqq");
        assert_eq!(page.amount, Amount::from_sats(21));
        assert_eq!(page.min_sats, 1);
        assert_eq!(page.max_sats, 1_000_000);
        assert!(page.svg.starts_with("<svg"));
        assert!(page.png_data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(
            resolver.transport().requests(),
            vec![
                "https://x/.well-known/lnurlp/user",
                "https://x/cb?amount=21000"
            ]
        );
    }

    #[tokio::test]
    async fn test_pay_page_rejection() {
        let resolver = resolver(r#"{"status":"ERROR","reason":"Wallet disabled"}"#);

        let result = resolver
            .pay_page("user@x", Some(21), &RenderOptions::default())
            .await;

        match result {
            Err(Error::Rejected(reason)) => assert_eq!(reason, "Wallet disabled"),
            other => panic!("Expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pay_page_without_invoice_or_reason() {
        let resolver = resolver("{}");

        let error = resolver
            .pay_page("user@x", Some(21), &RenderOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvoiceUnavailable(_)));
        assert_eq!(error.user_message(), INVOICE_FAILURE_MESSAGE);
    }
}
