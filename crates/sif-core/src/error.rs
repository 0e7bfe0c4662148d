//! Errors raised while building a descriptor input

use sif_schema::{DataType, SchemaError};
use thiserror::Error;

/// A type-specific metadata option was applied to an incompatible data object.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "got data type {:#06x} ({}), want {:#06x} ({})",
    .got.as_u32(),
    .got,
    .want.as_u32(),
    .want
)]
pub struct UnexpectedDataTypeError {
    /// Type the data object was declared with.
    pub got: DataType,
    /// Type the option requires.
    pub want: DataType,
}

/// Errors that can occur when building a [`crate::DescriptorInput`].
///
/// Each variant is raised by exactly one option; construction stops at the
/// first failure.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// Metadata option applied to the wrong declared type.
    #[error(transparent)]
    UnexpectedDataType(#[from] UnexpectedDataTypeError),

    /// Signing entity is malformed hex or too long for its field.
    #[error(transparent)]
    InvalidEncoding(SchemaError),

    /// Architecture name has no on-disk tag.
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    /// Writing the encoded record into the metadata buffer failed.
    #[error("failed to encode metadata: {0}")]
    Encode(#[from] std::io::Error),

    /// Any other schema failure.
    #[error(transparent)]
    Metadata(SchemaError),
}

impl From<SchemaError> for DescriptorError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownArch(name) => Self::UnknownArch(name),
            SchemaError::InvalidEntity(_) | SchemaError::EntityTooLong { .. } => {
                Self::InvalidEncoding(err)
            }
            other => Self::Metadata(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_renders_numeric_and_symbolic_types() {
        let err = UnexpectedDataTypeError {
            got: DataType::Generic,
            want: DataType::Partition,
        };
        assert_eq!(
            err.to_string(),
            "got data type 0x4007 (Generic/Raw), want 0x4004 (FS)"
        );
    }

    #[test]
    fn mismatch_is_transparent_through_descriptor_error() {
        let err = DescriptorError::from(UnexpectedDataTypeError {
            got: DataType::Signature,
            want: DataType::Partition,
        });
        assert!(matches!(
            err,
            DescriptorError::UnexpectedDataType(UnexpectedDataTypeError {
                got: DataType::Signature,
                want: DataType::Partition,
            })
        ));
        assert_eq!(
            err.to_string(),
            "got data type 0x4005 (Signature), want 0x4004 (FS)"
        );
    }

    #[test]
    fn schema_errors_map_to_their_kind() {
        let arch = DescriptorError::from(SchemaError::UnknownArch("sparc64".into()));
        assert!(matches!(arch, DescriptorError::UnknownArch(ref n) if n == "sparc64"));
        assert_eq!(arch.to_string(), "unknown architecture: sparc64");

        let long = DescriptorError::from(SchemaError::EntityTooLong { len: 300, max: 256 });
        assert!(matches!(long, DescriptorError::InvalidEncoding(_)));

        let short = DescriptorError::from(SchemaError::Truncated {
            layout: "partition",
            expected: 11,
            got: 3,
        });
        assert!(matches!(short, DescriptorError::Metadata(_)));
    }
}
