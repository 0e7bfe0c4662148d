//! Descriptor inputs for SIF data objects.
//!
//! A [`DescriptorInput`] is the fully resolved request to append one data
//! object to a container: its declared type, a handle to its content, and
//! the descriptor fields a container writer stores alongside it.
//!
//! # Example
//!
//! ```
//! use sif_core::{DescriptorInput, DescriptorInputOpt, DESCR_GROUP_MASK};
//! use sif_schema::{DataType, FsType, PartType};
//!
//! let image: &[u8] = b"squashfs image bytes";
//! let di = DescriptorInput::new(
//!     DataType::Partition,
//!     image,
//!     [
//!         DescriptorInputOpt::GroupId(1),
//!         DescriptorInputOpt::partition_metadata(FsType::Squash, PartType::PrimSys, "amd64"),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(di.group_id(), 1 | DESCR_GROUP_MASK);
//! assert_eq!(di.extra().len(), 11);
//! ```

pub mod descriptor_input;
pub mod error;
pub mod sys;

pub use descriptor_input::{DescriptorInput, DescriptorInputOpt};
pub use error::{DescriptorError, UnexpectedDataTypeError};
pub use sif_schema::DESCR_GROUP_MASK;
