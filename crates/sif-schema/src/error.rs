//! Errors raised while encoding or decoding schema values.

use thiserror::Error;

/// Errors that can occur when building or parsing SIF metadata records.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The architecture name has no on-disk tag.
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    /// The signing entity is not a valid hex string.
    #[error("invalid entity encoding: {0}")]
    InvalidEntity(#[from] hex::FromHexError),

    /// The decoded signing entity does not fit the fixed-width field.
    #[error("entity is {len} bytes, exceeds maximum of {max}")]
    EntityTooLong {
        /// Decoded length of the entity.
        len: usize,
        /// Width of the on-disk field.
        max: usize,
    },

    /// Fewer bytes than a record occupies on disk.
    #[error("{layout} metadata truncated: expected {expected} bytes, got {got}")]
    Truncated {
        /// Name of the record being decoded.
        layout: &'static str,
        /// Fixed size of the record.
        expected: usize,
        /// Bytes available.
        got: usize,
    },

    /// A numeric field holds a value outside its enumeration.
    #[error("unknown {kind} value: {value:#x}")]
    UnknownValue {
        /// Enumeration the value was decoded for.
        kind: &'static str,
        /// Offending value.
        value: u32,
    },
}
