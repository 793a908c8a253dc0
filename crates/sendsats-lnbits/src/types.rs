//! LNbits payments API types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /decode`
#[derive(Debug, Serialize)]
pub(crate) struct DecodeRequest<'a> {
    pub data: &'a str,
}

/// Body of an outgoing payment
#[derive(Debug, Serialize)]
pub(crate) struct PayRequest<'a> {
    pub out: bool,
    pub bolt11: &'a str,
}

/// Status of a payment as reported by LNbits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// Whether the invoice has been settled
    pub paid: bool,
    /// Preimage, once paid
    #[serde(default)]
    pub preimage: Option<String>,
    /// Extra payment details, when LNbits sends them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Result of a successful outgoing payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    /// Hash of the paid invoice
    pub payment_hash: String,
    /// LNbits internal payment id
    pub checking_id: Option<String>,
    /// Full response body
    pub raw: Value,
}
