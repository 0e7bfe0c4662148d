//! Option handling and assembly of a [`DescriptorInput`].

use std::io::Read;

use sif_schema::{
    CryptoMessage, DESCR_GROUP_MASK, DESCR_UNUSED_LINK, DataType, FixedLayout, FormatType, FsType,
    HashType, MessageType, PartType, Partition, Signature,
};
use tracing::{debug, trace};

use crate::error::{DescriptorError, UnexpectedDataTypeError};
use crate::sys;

/// Scratch state filled in by options during a single construction.
#[derive(Debug)]
struct DescriptorOpts {
    group_id: u32,
    link_id: u32,
    alignment: usize,
    name: String,
    extra: Vec<u8>,
}

impl DescriptorOpts {
    fn new() -> Self {
        Self {
            group_id: 0,
            link_id: DESCR_UNUSED_LINK,
            alignment: sys::page_size(),
            name: String::new(),
            extra: Vec::new(),
        }
    }
}

/// A single data object option.
///
/// Options are applied in the order given to [`DescriptorInput::new`]. The
/// generic setters may be repeated, with the last value winning. The
/// metadata options differ when repeated: partition metadata replaces any
/// earlier metadata, while signature and crypto message metadata append a
/// further record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorInputOpt {
    /// Place the object in group `id`.
    GroupId(u32),

    /// Link the object to the object or group `id`.
    LinkedId(u32),

    /// Align the object's payload to `n` bytes. Zero is passed through.
    Alignment(usize),

    /// Logical name of the object.
    Name(String),

    /// Partition metadata. Only valid for [`DataType::Partition`].
    PartitionMetadata {
        /// Filesystem held by the partition.
        fs_type: FsType,
        /// Role of the partition.
        part_type: PartType,
        /// Canonical architecture name, e.g. `amd64`.
        arch: String,
    },

    /// Signature metadata. Only valid for [`DataType::Signature`].
    SignatureMetadata {
        /// Hash algorithm of the signature.
        hash_type: HashType,
        /// Hex-encoded fingerprint of the signing entity.
        entity: String,
    },

    /// Crypto message metadata. Only valid for [`DataType::CryptoMessage`].
    CryptoMessageMetadata {
        /// Encoding of the message.
        format_type: FormatType,
        /// Kind of message.
        message_type: MessageType,
    },
}

impl DescriptorInputOpt {
    /// Shorthand for [`DescriptorInputOpt::Name`].
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Shorthand for [`DescriptorInputOpt::PartitionMetadata`].
    pub fn partition_metadata(
        fs_type: FsType,
        part_type: PartType,
        arch: impl Into<String>,
    ) -> Self {
        Self::PartitionMetadata {
            fs_type,
            part_type,
            arch: arch.into(),
        }
    }

    /// Shorthand for [`DescriptorInputOpt::SignatureMetadata`].
    pub fn signature_metadata(hash_type: HashType, entity: impl Into<String>) -> Self {
        Self::SignatureMetadata {
            hash_type,
            entity: entity.into(),
        }
    }

    /// Shorthand for [`DescriptorInputOpt::CryptoMessageMetadata`].
    pub fn crypto_message_metadata(format_type: FormatType, message_type: MessageType) -> Self {
        Self::CryptoMessageMetadata {
            format_type,
            message_type,
        }
    }

    fn apply(self, t: DataType, opts: &mut DescriptorOpts) -> Result<(), DescriptorError> {
        match self {
            Self::GroupId(id) => opts.group_id = id,
            Self::LinkedId(id) => opts.link_id = id,
            Self::Alignment(n) => opts.alignment = n,
            Self::Name(name) => opts.name = name,
            Self::PartitionMetadata {
                fs_type,
                part_type,
                arch,
            } => {
                expect_type(t, DataType::Partition)?;
                let data = Partition::new(fs_type, part_type, &arch)?;

                opts.extra.clear();
                data.write_to(&mut opts.extra)?;
            }
            Self::SignatureMetadata { hash_type, entity } => {
                expect_type(t, DataType::Signature)?;
                let data = Signature::new(hash_type, &entity)?;

                data.write_to(&mut opts.extra)?;
            }
            Self::CryptoMessageMetadata {
                format_type,
                message_type,
            } => {
                expect_type(t, DataType::CryptoMessage)?;
                let data = CryptoMessage {
                    format_type,
                    message_type,
                };

                data.write_to(&mut opts.extra)?;
            }
        }
        Ok(())
    }
}

fn expect_type(got: DataType, want: DataType) -> Result<(), UnexpectedDataTypeError> {
    if got != want {
        return Err(UnexpectedDataTypeError { got, want });
    }
    Ok(())
}

/// A data object ready to be appended to a container.
///
/// The content handle is captured as given and never read, seeked or
/// closed here; that is left to the container writer.
#[derive(Debug)]
pub struct DescriptorInput<R> {
    data_type: DataType,
    reader: R,
    group_id: u32,
    link_id: u32,
    alignment: usize,
    name: String,
    extra: Vec<u8>,
}

impl<R: Read> DescriptorInput<R> {
    /// Describe a data object of type `data_type` whose contents will be read
    /// from `reader`, configured by `opts` in order.
    ///
    /// Defaults: not part of any group, not linked, aligned to the host page
    /// size, no name, no extra metadata. Attach type-specific metadata with
    /// the partition, signature and crypto message options.
    ///
    /// # Errors
    ///
    /// Returns the error of the first option that fails. No partial result
    /// is produced.
    pub fn new<I>(data_type: DataType, reader: R, opts: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = DescriptorInputOpt>,
    {
        let mut dopts = DescriptorOpts::new();

        for opt in opts {
            debug!(%data_type, ?opt, "applying data object option");
            opt.apply(data_type, &mut dopts)?;
        }
        trace!(extra_len = dopts.extra.len(), "encoded extra metadata");

        let di = Self {
            data_type,
            reader,
            group_id: dopts.group_id | DESCR_GROUP_MASK,
            link_id: dopts.link_id,
            alignment: dopts.alignment,
            name: dopts.name,
            extra: dopts.extra,
        };
        debug!(
            %data_type,
            group_id = di.group_id,
            link_id = di.link_id,
            alignment = di.alignment,
            name = %di.name,
            "resolved descriptor input"
        );
        Ok(di)
    }
}

impl<R> DescriptorInput<R> {
    /// Declared type of the object.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Group ID, including [`DESCR_GROUP_MASK`].
    pub fn group_id(&self) -> u32 {
        self.group_id
    }

    /// ID of the object or group this object is linked to. Zero if unlinked.
    pub fn link_id(&self) -> u32 {
        self.link_id
    }

    /// Required alignment of the payload, in bytes.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Logical name. Empty if none was set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded type-specific metadata, ready to store verbatim.
    pub fn extra(&self) -> &[u8] {
        &self.extra
    }

    /// Content handle, untouched.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Hand the content handle over to the writer.
    pub fn into_reader(self) -> R {
        self.reader
    }
}
