//! shannons per kilobytes

use ckb_wallet_capacity::Capacity;
use serde::{Deserialize, Serialize};

const KB: u64 = 1000;

/// Fee charged per 1000 bytes of in-block transaction size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeeRate(u64);

impl FeeRate {
    /// Creates from a shannons/KB value.
    pub const fn from_u64(fee_per_kb: u64) -> Self {
        FeeRate(fee_per_kb)
    }

    /// Views the rate as shannons/KB.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The zero rate.
    pub const fn zero() -> Self {
        Self::from_u64(0)
    }

    /// Fee charged for a transaction of the given in-block size.
    ///
    /// Rounds up: a wallet paying exactly this fee never lands under the
    /// rate, which is what the node's minimum-fee check measures.
    pub fn fee(self, size: usize) -> Capacity {
        let base = self.0.saturating_mul(size as u64);
        let fee = base / KB;
        if fee * KB < base {
            Capacity::shannons(fee + 1)
        } else {
            Capacity::shannons(fee)
        }
    }
}

impl ::std::fmt::Display for FeeRate {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
