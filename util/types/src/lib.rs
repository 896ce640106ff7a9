//! Domain types for wallet-side transaction assembly.
//!
//! The crate provides the cell-model vocabulary a wallet needs to build
//! transactions off chain: scripts and cells, the mutable-by-rebuild
//! [`TransactionSkeleton`], the wire [`Transaction`] with its serialized
//! size and hash, and the [`FeeRate`] arithmetic fees are charged with.

pub mod bytes;
pub mod cell;
pub mod constants;
pub mod error;
pub mod fee_rate;
pub mod hash;
pub mod script;
pub mod transaction;

mod serialization;

pub use ckb_wallet_capacity::{
    capacity_bytes, Capacity, Error as CapacityError, Result as CapacityResult, BYTE_SHANNONS,
};

pub use bytes::JsonBytes;
pub use cell::{Cell, CellDep, CellInput, CellOutput, CellPage, DepType, OutPoint};
pub use error::{FromSliceError, OtherError, SkeletonError, VerificationError};
pub use fee_rate::FeeRate;
pub use hash::{blake2b_256, new_blake2b, H256};
pub use script::{LockLike, Script, ScriptHashType};
pub use transaction::{
    SigningEntry, Transaction, TransactionSkeleton, TransactionSkeletonBuilder, WitnessArgs,
};
