//! Transaction assembly for wallets that hold their cells under full
//! ownership.
//!
//! The crate turns a caller-built [`TransactionSkeleton`] into a funded,
//! fee-covered, signed transaction against an injected [`WalletRpc`] host:
//! [`WalletProvider::inject_capacity`] selects live cells and adds a change
//! output, [`WalletProvider::pay_fee`] repeats injection until the fee paid
//! covers the transaction's own serialized size, and
//! [`WalletProvider::sign_transaction`] weaves the host's signatures into
//! the witnesses.
//!
//! [`TransactionSkeleton`]: types::TransactionSkeleton

pub mod collector;
pub mod error;
pub mod provider;
pub mod rpc;
pub mod signing;
pub mod util;

#[cfg(test)]
mod tests;

pub use ckb_wallet_types as types;

pub use crate::collector::LiveCellCollector;
pub use crate::error::Error;
pub use crate::provider::{
    InjectCapacityOptions, PayBy, PayFeeOptions, WalletProvider, DEFAULT_FEE_RATE,
};
pub use crate::rpc::{GroupedSignatures, WalletRpc};
pub use crate::signing::prepare_signing_entries;
pub use crate::util::is_transaction_fee_paid;
