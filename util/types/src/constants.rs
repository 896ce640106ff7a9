//! All Constants.

/// Transaction version this crate assembles.
pub const TX_VERSION: u32 = 0;

/// Byte width of a secp256k1 recoverable signature.
pub const SECP_SIGNATURE_LEN: usize = 65;
