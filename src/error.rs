//! Errors raised while assembling transactions.

use ckb_wallet_types::{CapacityError, SkeletonError, VerificationError};
use thiserror::Error;

/// The provider error.
#[derive(Error, Debug)]
pub enum Error {
    /// The wallet host yielded no internal change lock.
    #[error("no change lock script found in the wallet")]
    NoChangeLock,
    /// The wallet's live cells cannot cover the requested capacity.
    #[error("no cell sufficient to inject")]
    InsufficientCells,
    /// An empty payer list with auto-inject disabled.
    #[error("no payer is provided, but auto-inject is disabled")]
    NoPayerConfigured,
    /// Every configured payer failed to cover the fee.
    #[error("no payer available to pay fee")]
    NoPayerAvailable,
    /// The host could not decode a full-format address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The host's signature response does not fit the transaction.
    #[error("invalid signature response: {0}")]
    Signature(String),
    /// Checked capacity arithmetic overflowed.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// The skeleton cannot be assembled into a wire transaction.
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),
    /// A witness could not be decoded.
    #[error(transparent)]
    Witness(#[from] VerificationError),
    /// The wallet host failed.
    #[error("rpc: {0}")]
    Rpc(#[from] anyhow::Error),
}
