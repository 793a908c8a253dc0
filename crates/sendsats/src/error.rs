//! Errors

use sendsats_http_client::HttpError;
use thiserror::Error;

/// Message shown to users when an address cannot be turned into an invoice
pub const INVALID_ADDRESS_MESSAGE: &str = "Not a valid Lightning Address";

/// Message shown to users when the callback produced neither an invoice nor a reason
pub const INVOICE_FAILURE_MESSAGE: &str = "Cannot resolve invoice, verify the Lightning Address";

/// Message shown to users when a QR code cannot be produced
pub const ENCODING_FAILURE_MESSAGE: &str = "Could not encode QR code";

/// sendsats Error
#[derive(Debug, Error)]
pub enum Error {
    /// Address is not of the form `user@domain`
    #[error("Malformed Lightning Address: {0}")]
    MalformedAddress(String),
    /// Network, DNS or timeout failure talking to the remote service
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] HttpError),
    /// LNURL-pay descriptor is missing required fields or is not JSON
    #[error("Invalid LNURL-pay descriptor: {0}")]
    InvalidDescriptor(String),
    /// Callback answered without an invoice or a reason, or could not be reached
    #[error("Invoice unavailable: {0}")]
    InvoiceUnavailable(String),
    /// Remote service declined with a reason
    #[error("Rejected by remote service: {0}")]
    Rejected(String),
    /// Payload cannot be encoded as a QR code
    #[error("QR encoding failure: {0}")]
    EncodingFailure(String),
}

impl Error {
    /// Text suitable for end users
    ///
    /// Remote rejection reasons are passed through verbatim so operators can see why an
    /// invoice was refused (e.g. amount below minimum).
    pub fn user_message(&self) -> String {
        match self {
            Error::MalformedAddress(_)
            | Error::TransportFailure(_)
            | Error::InvalidDescriptor(_) => INVALID_ADDRESS_MESSAGE.to_string(),
            Error::InvoiceUnavailable(_) => INVOICE_FAILURE_MESSAGE.to_string(),
            Error::Rejected(reason) => reason.clone(),
            Error::EncodingFailure(_) => ENCODING_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_internal_failures() {
        let errors = [
            Error::MalformedAddress("no '@'".to_string()),
            Error::TransportFailure(HttpError::Timeout),
            Error::InvalidDescriptor("missing callback".to_string()),
        ];

        for error in errors {
            assert_eq!(error.user_message(), INVALID_ADDRESS_MESSAGE);
        }
    }

    #[test]
    fn test_user_message_passes_reason_through() {
        let error = Error::Rejected("Amount 100 is smaller than minimum 100000.".to_string());
        assert_eq!(
            error.user_message(),
            "Amount 100 is smaller than minimum 100000."
        );
    }

    #[test]
    fn test_unavailable_invoice_message() {
        let error = Error::InvoiceUnavailable("response contains neither".to_string());
        assert_eq!(error.user_message(), INVOICE_FAILURE_MESSAGE);
    }

    #[test]
    fn test_from_http_error() {
        let error: Error = HttpError::Connection("refused".to_string()).into();
        assert!(matches!(error, Error::TransportFailure(_)));
    }
}
