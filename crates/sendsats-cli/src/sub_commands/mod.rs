use anyhow::{anyhow, Result};
use sendsats::{HttpClient, InvoiceCase, InvoiceResult, Resolver};

pub mod bolt11;
pub mod check;
pub mod decode;
pub mod info;
pub mod page;
pub mod pay;
pub mod qr;
pub mod svg;

/// Resolve an invoice, turning every failure into its user-facing message
pub async fn resolve_bolt11(
    resolver: &Resolver<HttpClient>,
    address: &str,
    amount: Option<u64>,
    invoice_case: InvoiceCase,
) -> Result<String> {
    resolver
        .clone()
        .with_invoice_case(invoice_case)
        .resolve_invoice(address, amount)
        .await
        .and_then(InvoiceResult::into_result)
        .map_err(|e| {
            tracing::debug!("Resolution failed: {}", e);
            anyhow!(e.user_message())
        })
}
