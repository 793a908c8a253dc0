//! Lightning Address resolver
//!
//! Entry point tying the steps together: address → descriptor → invoice.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use sendsats_http_client::HttpClient;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;

use crate::error::Error;
use crate::lightning_address::LightningAddress;
use crate::lnurl::{self, InvoiceCase, InvoiceResult, ServiceDescriptor};
use crate::transport::LnurlTransport;

/// Resolves Lightning Addresses into invoices
///
/// Holds no state between calls beyond its collaborators. When a [`Dispatch`] is set, every
/// operation runs under it instead of the global subscriber.
#[derive(Debug, Clone)]
pub struct Resolver<T = HttpClient>
where
    T: LnurlTransport,
{
    transport: Arc<T>,
    invoice_case: InvoiceCase,
    dispatch: Option<Dispatch>,
}

impl Resolver<HttpClient> {
    /// Resolver with a default HTTP client
    pub fn new() -> Self {
        Self::with_transport(HttpClient::new())
    }
}

impl Default for Resolver<HttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resolver<T>
where
    T: LnurlTransport,
{
    /// Resolver over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            invoice_case: InvoiceCase::default(),
            dispatch: None,
        }
    }

    /// Case applied to returned invoices
    pub fn with_invoice_case(mut self, invoice_case: InvoiceCase) -> Self {
        self.invoice_case = invoice_case;
        self
    }

    /// Log through `dispatch` rather than the global subscriber
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the LNURL-pay descriptor for `address`
    pub async fn fetch_descriptor(&self, address: &str) -> Result<ServiceDescriptor, Error> {
        self.in_scope(async {
            let address = LightningAddress::from_str(address)?;
            lnurl::fetch_descriptor(self.transport.as_ref(), &address.lnurlp_url()).await
        })
        .await
    }

    /// Resolve `address` into an invoice for `amount_sats`
    ///
    /// `Err` covers failures before negotiation (malformed address, unreachable or invalid
    /// descriptor). Negotiation outcomes, including rejections, are in the [`InvoiceResult`].
    pub async fn resolve_invoice(
        &self,
        address: &str,
        amount_sats: Option<u64>,
    ) -> Result<InvoiceResult, Error> {
        self.resolve_invoice_with(address, amount_sats, None).await
    }

    /// Like [`Resolver::resolve_invoice`], reusing `descriptor` when given
    ///
    /// A supplied descriptor skips the metadata request, the address is still validated.
    pub async fn resolve_invoice_with(
        &self,
        address: &str,
        amount_sats: Option<u64>,
        descriptor: Option<&ServiceDescriptor>,
    ) -> Result<InvoiceResult, Error> {
        self.in_scope(async {
            let address = LightningAddress::from_str(address)?;
            tracing::debug!("Resolving invoice for {}", address);

            let fetched;
            let descriptor = match descriptor {
                Some(descriptor) => descriptor,
                None => {
                    fetched =
                        lnurl::fetch_descriptor(self.transport.as_ref(), &address.lnurlp_url())
                            .await?;
                    &fetched
                }
            };

            let result = lnurl::negotiate(self.transport.as_ref(), descriptor, amount_sats).await;

            Ok(result.with_case(self.invoice_case))
        })
        .await
    }

    pub(crate) async fn in_scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        match &self.dispatch {
            Some(dispatch) => future.with_subscriber(dispatch.clone()).await,
            None => future.await,
        }
    }
}
