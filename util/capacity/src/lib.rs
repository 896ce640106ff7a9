//! The capacity unit of the cell model.
//!
//! Capacity is denominated in shannons; one CKByte is `100_000_000`
//! shannons and buys one byte of on-chain storage. All arithmetic is
//! checked, an operation that would wrap reports [`Error::Overflow`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shannons per CKByte.
pub const BYTE_SHANNONS: u64 = 100_000_000;

/// Count of shannons.
#[derive(
    Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Capacity(u64);

/// Error for capacity calculation.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// Arithmetic overflow.
    #[error("capacity arithmetic overflow")]
    Overflow,
}

/// Result type alias for capacity calculation.
pub type Result<T> = ::std::result::Result<T, Error>;

impl Capacity {
    /// Capacity of zero shannons.
    pub const fn zero() -> Self {
        Capacity(0)
    }

    /// Capacity of one shannon.
    pub const fn one() -> Self {
        Capacity(1)
    }

    /// Views the given shannons as a capacity.
    pub const fn shannons(val: u64) -> Self {
        Capacity(val)
    }

    /// Converts CKBytes into shannons.
    pub fn bytes(val: usize) -> Result<Self> {
        (val as u64)
            .checked_mul(BYTE_SHANNONS)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Views the capacity as shannons.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Checked addition.
    pub fn safe_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Checked subtraction.
    pub fn safe_sub(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Checked multiplication by a scalar.
    pub fn safe_mul(self, rhs: u64) -> Result<Self> {
        self.0
            .checked_mul(rhs)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }
}

impl ::std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Constructs a capacity from a CKBytes literal.
#[macro_export]
macro_rules! capacity_bytes {
    ($n:expr) => {
        $crate::Capacity::shannons($n * $crate::BYTE_SHANNONS)
    };
}
