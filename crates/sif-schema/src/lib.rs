//! On-disk vocabulary of the SIF container format.
//!
//! This crate holds the enumerations, the architecture table and the
//! fixed-width metadata records that a descriptor carries as extra data.
//! Everything here is pure data: no I/O beyond writing into a caller
//! supplied [`std::io::Write`].

pub mod arch;
pub mod error;
pub mod metadata;
pub mod types;

// Re-exports
pub use arch::*;
pub use error::SchemaError;
pub use metadata::{CryptoMessage, FixedLayout, Partition, Signature};
pub use types::*;

/// Bits reserved in a descriptor group ID to mark group membership.
///
/// A raw group ID of `0` is ambiguous on disk, so every grouped object
/// carries these bits on top of its user-visible ID.
pub const DESCR_GROUP_MASK: u32 = 0xf000_0000;

/// Group ID of a descriptor that does not belong to any group.
pub const DESCR_UNUSED_GROUP: u32 = DESCR_GROUP_MASK;

/// First group ID handed out when groups are created.
pub const DESCR_DEFAULT_GROUP: u32 = DESCR_GROUP_MASK | 1;

/// Link value of a descriptor that is not linked to another object.
pub const DESCR_UNUSED_LINK: u32 = 0;

/// Width of the signing entity field in a signature record.
pub const DESCR_ENTITY_LEN: usize = 256;

/// Space reserved in a descriptor for type specific extra metadata.
pub const DESCR_MAX_PRIV_LEN: usize = 384;

/// Width of an architecture tag.
pub const HDR_ARCH_LEN: usize = 3;
