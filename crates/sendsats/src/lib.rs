#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod amount;
pub mod error;
pub mod lightning_address;
pub mod lnurl;
#[cfg(feature = "qr")]
pub mod pay_page;
#[cfg(feature = "qr")]
pub mod qr;
pub mod resolver;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use sendsats_http_client::{HttpClient, HttpClientBuilder, HttpError};

#[doc(hidden)]
pub use self::amount::Amount;
#[doc(hidden)]
pub use self::error::{Error, INVOICE_FAILURE_MESSAGE};
#[doc(hidden)]
pub use self::lightning_address::{resolve, LightningAddress};
#[doc(hidden)]
pub use self::lnurl::{fetch_descriptor, negotiate, InvoiceCase, InvoiceResult, ServiceDescriptor};
#[cfg(feature = "qr")]
#[doc(hidden)]
pub use self::pay_page::PayPage;
#[cfg(feature = "qr")]
#[doc(hidden)]
pub use self::qr::{
    encode, png_data_uri, render_raster, render_vector, Color, EncodedImage, ErrorCorrection,
    PayloadConvention, QrFormat, RenderOptions, DEFAULT_SCALE, LIGHTNING_URI_PREFIX, MAX_IMAGE_SIDE,
};
#[doc(hidden)]
pub use self::resolver::Resolver;
#[doc(hidden)]
pub use self::transport::LnurlTransport;
