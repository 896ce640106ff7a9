//! Lock and type scripts.

use ckb_wallet_capacity::{Capacity, Result as CapacityResult};
use serde::{Deserialize, Serialize};

use crate::bytes::JsonBytes;
use crate::error::OtherError;
use crate::hash::H256;

/// Specifies how the script `code_hash` is used to match script code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptHashType {
    /// Matches the data hash of the code, executed under the v0 VM.
    Data = 0,
    /// Matches the type script hash of the cell carrying the code.
    Type = 1,
    /// Matches the data hash of the code, executed under the v1 VM.
    Data1 = 2,
}

impl Default for ScriptHashType {
    fn default() -> Self {
        ScriptHashType::Data
    }
}

impl TryFrom<u8> for ScriptHashType {
    type Error = OtherError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ScriptHashType::Data),
            1 => Ok(ScriptHashType::Type),
            2 => Ok(ScriptHashType::Data1),
            _ => Err(OtherError::new(format!("Invalid script hash type {v}"))),
        }
    }
}

impl From<ScriptHashType> for u8 {
    fn from(v: ScriptHashType) -> u8 {
        v as u8
    }
}

/// A cell lock or type script.
///
/// Two scripts denote the same script when `code_hash`, `hash_type` and
/// `args` are all equal; no canonical serialization is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Identifies the script code.
    pub code_hash: H256,
    /// How `code_hash` matches the code.
    pub hash_type: ScriptHashType,
    /// Auxiliary argument bytes, for lock scripts typically a pubkey hash.
    pub args: JsonBytes,
}

impl Script {
    /// Creates a script.
    pub fn new(code_hash: H256, hash_type: ScriptHashType, args: JsonBytes) -> Self {
        Script {
            code_hash,
            hash_type,
            args,
        }
    }

    /// Bytes the script occupies inside a cell: the args plus the 32-byte
    /// code hash and the hash-type byte.
    pub fn occupied_capacity(&self) -> CapacityResult<Capacity> {
        Capacity::bytes(self.args.len() + 32 + 1)
    }
}

/// A lock given either structurally or as a full-format address.
///
/// Address decoding is the wallet host's concern; the assembly core never
/// interprets the string itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LockLike {
    /// A full-format address string.
    Address(String),
    /// A structured lock script.
    Script(Script),
}

impl From<Script> for LockLike {
    fn from(script: Script) -> Self {
        LockLike::Script(script)
    }
}

impl From<String> for LockLike {
    fn from(address: String) -> Self {
        LockLike::Address(address)
    }
}

impl From<&str> for LockLike {
    fn from(address: &str) -> Self {
        LockLike::Address(address.to_owned())
    }
}
