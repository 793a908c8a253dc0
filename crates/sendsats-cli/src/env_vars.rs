//! Environment variable overrides
//!
//! The LNbits names match what existing deployments already export.

use std::env;

use crate::config::{Http, LNbits, Qr, Settings};

pub const ENV_LNBITS_BASE_URL: &str = "BASE_URL";
pub const ENV_LNBITS_INVOICE_KEY: &str = "INVOICE_KEY";
pub const ENV_LNBITS_ADMIN_KEY: &str = "ADMIN_KEY";

pub const ENV_HTTP_TIMEOUT_SECS: &str = "SENDSATS_HTTP_TIMEOUT_SECS";
pub const ENV_HTTP_PROXY: &str = "SENDSATS_HTTP_PROXY";

pub const ENV_QR_SCALE: &str = "SENDSATS_QR_SCALE";
pub const ENV_QR_MODULE_COLOR: &str = "SENDSATS_QR_MODULE_COLOR";
pub const ENV_QR_BACKGROUND_COLOR: &str = "SENDSATS_QR_BACKGROUND_COLOR";

impl Settings {
    pub fn from_env(mut self) -> Self {
        self.http = self.http.from_env();
        self.qr = self.qr.from_env();
        self.lnbits = self.lnbits.from_env();
        self
    }
}

impl Http {
    pub fn from_env(mut self) -> Self {
        if let Ok(timeout_str) = env::var(ENV_HTTP_TIMEOUT_SECS) {
            match timeout_str.parse() {
                Ok(timeout) => self.timeout_secs = timeout,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_HTTP_TIMEOUT_SECS, e),
            }
        }

        if let Ok(proxy) = env::var(ENV_HTTP_PROXY) {
            self.proxy = Some(proxy);
        }

        self
    }
}

impl Qr {
    pub fn from_env(mut self) -> Self {
        if let Ok(scale_str) = env::var(ENV_QR_SCALE) {
            match scale_str.parse() {
                Ok(scale) => self.scale = scale,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_QR_SCALE, e),
            }
        }

        if let Ok(color_str) = env::var(ENV_QR_MODULE_COLOR) {
            match color_str.parse() {
                Ok(color) => self.module_color = color,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_QR_MODULE_COLOR, e),
            }
        }

        if let Ok(color_str) = env::var(ENV_QR_BACKGROUND_COLOR) {
            match color_str.parse() {
                Ok(color) => self.background_color = color,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_QR_BACKGROUND_COLOR, e),
            }
        }

        self
    }
}

impl LNbits {
    pub fn from_env(mut self) -> Self {
        if let Ok(base_url) = env::var(ENV_LNBITS_BASE_URL) {
            self.base_url = base_url;
        }

        if let Ok(invoice_key) = env::var(ENV_LNBITS_INVOICE_KEY) {
            self.invoice_key = invoice_key;
        }

        if let Ok(admin_key) = env::var(ENV_LNBITS_ADMIN_KEY) {
            self.admin_key = admin_key;
        }

        self
    }
}
