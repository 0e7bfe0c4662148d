//! Fixed-width metadata records stored after a descriptor.
//!
//! Three data types carry extra metadata: partitions, signatures and
//! cryptographic messages. Each record has a canonical little-endian
//! layout that readers parse back field by field:
//!
//! ```text
//! Partition:      [fstype:4][parttype:4][arch:3]
//! Signature:      [hashtype:4][entity:256]
//! CryptoMessage:  [formattype:4][messagetype:4]
//! ```

use std::io::{self, Write};

use crate::arch::Arch;
use crate::error::SchemaError;
use crate::types::{FormatType, FsType, HashType, MessageType, PartType};
use crate::{DESCR_ENTITY_LEN, HDR_ARCH_LEN};

/// A metadata record with a fixed on-disk size.
pub trait FixedLayout: Sized {
    /// Record name used in error messages.
    const NAME: &'static str;

    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write the little-endian encoding of `self` to `w`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()>;

    /// Decode a record from the front of `bytes`. Trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Truncated`] if `bytes` is shorter than
    /// [`Self::SIZE`], or an enumeration error for out-of-range fields.
    fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError>;

    /// Encode into a freshly allocated buffer.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::write_to`].
    fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}

fn check_len<T: FixedLayout>(bytes: &[u8]) -> Result<(), SchemaError> {
    if bytes.len() < T::SIZE {
        return Err(SchemaError::Truncated {
            layout: T::NAME,
            expected: T::SIZE,
            got: bytes.len(),
        });
    }
    Ok(())
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Metadata of a partition data object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Filesystem held by the partition.
    pub fs_type: FsType,
    /// Role of the partition.
    pub part_type: PartType,
    /// Architecture the partition was built for.
    pub arch: Arch,
}

impl Partition {
    /// Build a partition record, resolving `arch` by its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownArch`] if `arch` has no on-disk tag.
    pub fn new(fs_type: FsType, part_type: PartType, arch: &str) -> Result<Self, SchemaError> {
        Ok(Self {
            fs_type,
            part_type,
            arch: arch.parse()?,
        })
    }
}

impl FixedLayout for Partition {
    const NAME: &'static str = "partition";
    const SIZE: usize = 4 + 4 + HDR_ARCH_LEN;

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.fs_type.as_u32().to_le_bytes())?;
        w.write_all(&self.part_type.as_u32().to_le_bytes())?;
        w.write_all(&self.arch.tag())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        check_len::<Self>(bytes)?;

        let mut tag = [0u8; HDR_ARCH_LEN];
        tag.copy_from_slice(&bytes[8..8 + HDR_ARCH_LEN]);

        Ok(Self {
            fs_type: FsType::try_from(read_u32(bytes, 0))?,
            part_type: PartType::try_from(read_u32(bytes, 4))?,
            arch: Arch::from_tag(&tag)?,
        })
    }
}

/// Metadata of a signature data object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Hash algorithm the signature covers.
    pub hash_type: HashType,
    entity: [u8; DESCR_ENTITY_LEN],
}

impl Signature {
    /// Build a signature record from a hex-encoded entity fingerprint.
    ///
    /// Hex digits are accepted in either case. The decoded bytes are placed
    /// at the start of the entity field and the rest is zero-filled.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidEntity`] for malformed hex and
    /// [`SchemaError::EntityTooLong`] if the decoded bytes exceed
    /// [`DESCR_ENTITY_LEN`].
    pub fn new(hash_type: HashType, entity: &str) -> Result<Self, SchemaError> {
        let decoded = hex::decode(entity)?;
        Self::from_entity_bytes(hash_type, &decoded)
    }

    /// Build a signature record from raw fingerprint bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EntityTooLong`] if `entity` exceeds
    /// [`DESCR_ENTITY_LEN`].
    pub fn from_entity_bytes(hash_type: HashType, entity: &[u8]) -> Result<Self, SchemaError> {
        if entity.len() > DESCR_ENTITY_LEN {
            return Err(SchemaError::EntityTooLong {
                len: entity.len(),
                max: DESCR_ENTITY_LEN,
            });
        }

        let mut field = [0u8; DESCR_ENTITY_LEN];
        field[..entity.len()].copy_from_slice(entity);
        Ok(Self {
            hash_type,
            entity: field,
        })
    }

    /// The full zero-padded entity field.
    pub fn entity(&self) -> &[u8; DESCR_ENTITY_LEN] {
        &self.entity
    }
}

impl FixedLayout for Signature {
    const NAME: &'static str = "signature";
    const SIZE: usize = 4 + DESCR_ENTITY_LEN;

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.hash_type.as_u32().to_le_bytes())?;
        w.write_all(&self.entity)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        check_len::<Self>(bytes)?;

        let mut entity = [0u8; DESCR_ENTITY_LEN];
        entity.copy_from_slice(&bytes[4..4 + DESCR_ENTITY_LEN]);

        Ok(Self {
            hash_type: HashType::try_from(read_u32(bytes, 0))?,
            entity,
        })
    }
}

/// Metadata of a cryptographic message data object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoMessage {
    /// Encoding of the message.
    pub format_type: FormatType,
    /// Kind of message.
    pub message_type: MessageType,
}

impl FixedLayout for CryptoMessage {
    const NAME: &'static str = "crypto message";
    const SIZE: usize = 4 + 4;

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.format_type.as_u32().to_le_bytes())?;
        w.write_all(&self.message_type.as_u32().to_le_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        check_len::<Self>(bytes)?;

        Ok(Self {
            format_type: FormatType::try_from(read_u32(bytes, 0))?,
            message_type: MessageType::try_from(read_u32(bytes, 4))?,
        })
    }
}
