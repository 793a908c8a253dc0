#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

mod client;
pub mod error;
pub mod types;

pub use client::LNbitsClient;
pub use error::{Error, Result};
pub use types::{PaymentReceipt, PaymentStatus};
