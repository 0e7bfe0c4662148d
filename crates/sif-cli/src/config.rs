//! Flag parsing for `siftool add`.
//!
//! [`AddArgs`] holds the raw flags as typed by the user. [`AddConfig`] is the
//! immutable, validated view of one invocation: the declared data type and
//! the ordered list of options handed to [`sif_core::DescriptorInput::new`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use sif_core::DescriptorInputOpt;
use sif_schema::{Arch, DataType, FsType, HashType, PartType};

/// Raw flags of the `add` subcommand.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Path of the SIF image the object is destined for
    pub sif_path: PathBuf,

    /// File holding the data object's contents
    pub object_path: PathBuf,

    /// The type of data to add:
    /// 1-Deffile, 2-EnvVar, 3-Labels, 4-Partition, 5-Signature, 6-GenericJSON, 7-Generic,
    /// 8-CryptoMessage
    #[arg(long)]
    pub datatype: u32,

    /// The type of partition (with --datatype 4): 1-System, 2-PrimSys, 3-Data, 4-Overlay
    #[arg(long)]
    pub parttype: Option<u32>,

    /// The filesystem used (with --datatype 4): 1-Squash, 2-Ext3, 3-ImmuObj, 4-Raw,
    /// 5-EncryptedSquashfs
    #[arg(long)]
    pub partfs: Option<u32>,

    /// The main architecture used (with --datatype 4), see `siftool arch`
    #[arg(long)]
    pub partarch: Option<u8>,

    /// The signature hash used (with --datatype 5): 1-SHA256, 2-SHA384, 3-SHA512, 4-BLAKE2S,
    /// 5-BLAKE2B
    #[arg(long)]
    pub signhash: Option<u32>,

    /// The entity that signs, as a hex fingerprint (with --datatype 5)
    #[arg(long)]
    pub signentity: Option<String>,

    /// Set the group ID
    #[arg(long)]
    pub groupid: Option<u32>,

    /// Set the link pointer
    #[arg(long)]
    pub link: Option<u32>,

    /// Set the alignment constraint [default: host page size]
    #[arg(long)]
    pub alignment: Option<usize>,

    /// Set the logical name [default: object file name]
    #[arg(long)]
    pub filename: Option<String>,
}

/// Resolved settings of one `add` invocation.
#[derive(Debug, Clone)]
pub struct AddConfig {
    sif_path: PathBuf,
    object_path: PathBuf,
    data_type: DataType,
    options: Vec<DescriptorInputOpt>,
}

impl AddConfig {
    /// Path of the target SIF image.
    pub fn sif_path(&self) -> &Path {
        &self.sif_path
    }

    /// Path of the object contents.
    pub fn object_path(&self) -> &Path {
        &self.object_path
    }

    /// Declared data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Options in the order they are applied.
    pub fn options(&self) -> &[DescriptorInputOpt] {
        &self.options
    }
}

impl TryFrom<AddArgs> for AddConfig {
    type Error = anyhow::Error;

    fn try_from(args: AddArgs) -> Result<Self> {
        let data_type = data_type_from_code(args.datatype)?;
        let options = build_options(data_type, &args)?;

        Ok(Self {
            sif_path: args.sif_path,
            object_path: args.object_path,
            data_type,
            options,
        })
    }
}

/// Map the `--datatype` code to a data type.
///
/// # Errors
///
/// Returns an error for codes outside `1..=8`.
pub fn data_type_from_code(code: u32) -> Result<DataType> {
    let t = match code {
        1 => DataType::Deffile,
        2 => DataType::EnvVar,
        3 => DataType::Labels,
        4 => DataType::Partition,
        5 => DataType::Signature,
        6 => DataType::GenericJson,
        7 => DataType::Generic,
        8 => DataType::CryptoMessage,
        _ => bail!("--datatype flag is required with a valid range"),
    };
    Ok(t)
}

/// Map the `--partarch` code to a canonical architecture name.
///
/// # Errors
///
/// Returns an error for codes outside `1..=11`.
pub fn arch_from_code(code: u8) -> Result<&'static str> {
    Arch::from_code(code)
        .map(|arch| arch.as_str())
        .with_context(|| format!("unknown --partarch code: {code}"))
}

fn build_options(data_type: DataType, args: &AddArgs) -> Result<Vec<DescriptorInputOpt>> {
    let mut opts = Vec::new();

    if let Some(id) = args.groupid {
        opts.push(DescriptorInputOpt::GroupId(id));
    }

    if let Some(id) = args.link {
        opts.push(DescriptorInputOpt::LinkedId(id));
    }

    if let Some(n) = args.alignment {
        opts.push(DescriptorInputOpt::Alignment(n));
    }

    match &args.filename {
        Some(name) => opts.push(DescriptorInputOpt::name(name.as_str())),
        None => {
            if let Some(base) = args.object_path.file_name() {
                opts.push(DescriptorInputOpt::name(base.to_string_lossy()));
            }
        }
    }

    match data_type {
        DataType::Partition => {
            let (Some(fs), Some(pt), Some(arch)) = (args.partfs, args.parttype, args.partarch)
            else {
                bail!("with partition datatype, --partfs, --parttype and --partarch must be passed");
            };

            let fs_type = FsType::try_from(fs).context("invalid --partfs")?;
            let part_type = PartType::try_from(pt).context("invalid --parttype")?;
            opts.push(DescriptorInputOpt::partition_metadata(
                fs_type,
                part_type,
                arch_from_code(arch)?,
            ));
        }
        DataType::Signature => {
            let (Some(hash), Some(entity)) = (args.signhash, &args.signentity) else {
                bail!("with signature datatype, --signhash and --signentity must be passed");
            };

            let hash_type = HashType::try_from(hash).context("invalid --signhash")?;
            opts.push(DescriptorInputOpt::signature_metadata(
                hash_type,
                entity.as_str(),
            ));
        }
        _ => {}
    }

    Ok(opts)
}
