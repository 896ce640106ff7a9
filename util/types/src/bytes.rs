//! Variable-length bytes with 0x-prefixed hex JSON form.

use std::fmt;

use bytes::Bytes;
use faster_hex::{hex_decode, hex_encode};

/// Variable-length binary data, serialized as a 0x-prefixed hex string.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonBytes(Bytes);

impl JsonBytes {
    /// Creates from a vector.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        JsonBytes(Bytes::from(bytes))
    }

    /// Creates from shared bytes.
    pub fn from_bytes(bytes: Bytes) -> Self {
        JsonBytes(bytes)
    }

    /// Consumes into a vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Consumes into shared bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes at all.
    pub fn is_empty(&self) -> bool {
        0 == self.len()
    }

    /// Views the content as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for JsonBytes {
    fn from(bytes: Vec<u8>) -> Self {
        JsonBytes::from_vec(bytes)
    }
}

impl From<&[u8]> for JsonBytes {
    fn from(bytes: &[u8]) -> Self {
        JsonBytes(Bytes::copy_from_slice(bytes))
    }
}

impl fmt::Debug for JsonBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buffer = vec![0u8; self.len() * 2];
        hex_encode(self.as_bytes(), &mut buffer).map_err(|_| fmt::Error)?;
        f.write_str("0x")?;
        f.write_str(std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?)
    }
}

struct BytesVisitor;

impl<'b> serde::de::Visitor<'b> for BytesVisitor {
    type Value = JsonBytes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a 0x-prefixed hex string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if v.len() < 2 || &v[0..2] != "0x" || v.len() & 1 != 0 {
            return Err(E::invalid_value(serde::de::Unexpected::Str(v), &self));
        }
        let bytes = &v.as_bytes()[2..];
        if bytes.is_empty() {
            return Ok(JsonBytes::default());
        }
        let mut buffer = vec![0; bytes.len() / 2]; // we checked length
        hex_decode(bytes, &mut buffer).map_err(|e| E::custom(format_args!("{e:?}")))?;
        Ok(JsonBytes::from_vec(buffer))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_str(&v)
    }
}

impl serde::Serialize for JsonBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buffer = vec![0u8; self.len() * 2 + 2];
        buffer[0] = b'0';
        buffer[1] = b'x';
        hex_encode(self.as_bytes(), &mut buffer[2..])
            .map_err(|e| serde::ser::Error::custom(format_args!("{e}")))?;
        let encoded =
            std::str::from_utf8(&buffer).map_err(|e| serde::ser::Error::custom(format_args!("{e}")))?;
        serializer.serialize_str(encoded)
    }
}

impl<'de> serde::Deserialize<'de> for JsonBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(BytesVisitor)
    }
}
