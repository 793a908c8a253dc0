//! Millisatoshi amounts
//!
//! LNURL-pay speaks millisatoshis on the wire while callers think in whole satoshis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Millisatoshis in one satoshi
pub const MSAT_IN_SAT: u64 = 1000;

/// An amount in millisatoshis
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero millisatoshis
    pub const ZERO: Amount = Amount(0);

    /// Amount from millisatoshis
    #[inline]
    pub const fn from_msat(msat: u64) -> Self {
        Self(msat)
    }

    /// Amount from whole satoshis, saturating at `u64::MAX` millisatoshis
    #[inline]
    pub const fn from_sats(sats: u64) -> Self {
        Self(sats.saturating_mul(MSAT_IN_SAT))
    }

    /// The amount in millisatoshis
    #[inline]
    pub const fn msat(&self) -> u64 {
        self.0
    }

    /// The amount in whole satoshis, rounding down
    #[inline]
    pub const fn sats_floor(&self) -> u64 {
        self.0 / MSAT_IN_SAT
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} msat", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(msat: u64) -> Self {
        Self(msat)
    }
}

impl From<Amount> for u64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}
