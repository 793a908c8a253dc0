//! LNURL-pay protocol steps
//!
//! [`descriptor`] fetches and validates the service descriptor, [`negotiator`] turns it
//! into an invoice.

pub mod descriptor;
pub mod negotiator;

pub use descriptor::{fetch_descriptor, ServiceDescriptor};
pub use negotiator::{
    callback_url, classify_callback_response, negotiate, target_amount, InvoiceCase, InvoiceResult,
};
