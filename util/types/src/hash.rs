//! The 32-byte hash and the blake2b flavor it is produced with.

use std::fmt;

use blake2b_ref::{Blake2b, Blake2bBuilder};
use faster_hex::{hex_decode, hex_encode};

use crate::error::FromSliceError;

/// Personalization of the chain's blake2b instances.
pub const CKB_HASH_PERSONALIZATION: &[u8] = b"ckb-default-hash";

/// The 32-byte fixed-length binary data, typically a blake2b-256 digest.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256(pub [u8; 32]);

impl H256 {
    /// Converts a 32-byte slice.
    pub fn from_slice(input: &[u8]) -> Result<Self, FromSliceError> {
        if input.len() != 32 {
            return Err(FromSliceError(input.len()));
        }
        let mut inner = [0u8; 32];
        inner.copy_from_slice(input);
        Ok(H256(inner))
    }

    /// Views the hash as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for H256 {
    fn from(inner: [u8; 32]) -> Self {
        H256(inner)
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buffer = [0u8; 64];
        hex_encode(&self.0, &mut buffer).map_err(|_| fmt::Error)?;
        f.write_str("0x")?;
        f.write_str(std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

struct H256Visitor;

impl<'b> serde::de::Visitor<'b> for H256Visitor {
    type Value = H256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a 0x-prefixed hex string of 32 bytes")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if v.len() != 66 || &v[0..2] != "0x" {
            return Err(E::invalid_value(serde::de::Unexpected::Str(v), &self));
        }
        let mut inner = [0u8; 32];
        hex_decode(&v.as_bytes()[2..], &mut inner)
            .map_err(|e| E::custom(format_args!("{e:?}")))?;
        Ok(H256(inner))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_str(&v)
    }
}

impl serde::Serialize for H256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for H256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(H256Visitor)
    }
}

/// Creates a blake2b instance with the chain personalization.
pub fn new_blake2b() -> Blake2b {
    Blake2bBuilder::new(32)
        .personal(CKB_HASH_PERSONALIZATION)
        .build()
}

/// Computes the blake2b-256 digest of the data.
pub fn blake2b_256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut blake2b = new_blake2b();
    blake2b.update(data.as_ref());
    blake2b.finalize(&mut result);
    result
}
