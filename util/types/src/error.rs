//! Errors of the type layer.

use thiserror::Error;

/// Error assembling a wire transaction from a skeleton.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SkeletonError {
    /// An input cell carries no out-point to consume.
    #[error("input {index} has no out-point")]
    InputWithoutOutPoint {
        /// Position of the offending input.
        index: usize,
    },
}

/// Error decoding a serialized structure.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum VerificationError {
    /// The slice length differs from the length its header declares.
    #[error("{0}: total size does not match")]
    TotalSizeNotMatch(&'static str),
    /// An offset is out of range or offsets are not increasing.
    #[error("{0}: offsets do not match")]
    OffsetsNotMatch(&'static str),
    /// The header declares an unexpected number of fields.
    #[error("{0}: field count does not match")]
    FieldCountNotMatch(&'static str),
}

/// Error converting a byte slice into a fixed-length hash.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("invalid slice length {0}, expected 32")]
pub struct FromSliceError(pub usize);

/// A catch-all error with a descriptive message.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("{0}")]
pub struct OtherError(String);

impl OtherError {
    /// Creates an error with the given message.
    pub fn new<S: std::fmt::Display>(message: S) -> Self {
        OtherError(message.to_string())
    }
}
