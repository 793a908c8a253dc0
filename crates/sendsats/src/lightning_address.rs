//! Lightning Address
//!
//! Lightning addresses are user-friendly identifiers that look like email addresses
//! (e.g. `user@domain.com`). They map onto an LNURL-pay endpoint:
//! <https://domain.com/.well-known/lnurlp/user>

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Lightning address - a validated `user@domain`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LightningAddress {
    user: String,
    domain: String,
}

impl LightningAddress {
    /// The part before the `@`
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The part after the `@`
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The LNURL-pay metadata URL for this address
    ///
    /// The user part is inserted verbatim, no percent-encoding is applied.
    pub fn lnurlp_url(&self) -> String {
        format!("https://{}/.well-known/lnurlp/{}", self.domain, self.user)
    }
}

impl FromStr for LightningAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (user, domain) = trimmed
            .split_once('@')
            .ok_or_else(|| Error::MalformedAddress("must contain '@'".to_string()))?;

        if domain.contains('@') {
            return Err(Error::MalformedAddress(
                "must contain exactly one '@'".to_string(),
            ));
        }

        if user.is_empty() || domain.is_empty() {
            return Err(Error::MalformedAddress(
                "user and domain must not be empty".to_string(),
            ));
        }

        Ok(LightningAddress {
            user: user.to_string(),
            domain: domain.to_string(),
        })
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.domain)
    }
}

/// Turn `user@domain` into its LNURL-pay metadata URL
pub fn resolve(identifier: &str) -> Result<String, Error> {
    let address = LightningAddress::from_str(identifier)?;
    let url = address.lnurlp_url();
    tracing::debug!("Resolved {} to {}", address, url);
    Ok(url)
}
