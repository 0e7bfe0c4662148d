//! Add command

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use sif_core::{DESCR_GROUP_MASK, DescriptorInput};
use sif_schema::{CryptoMessage, DataType, FixedLayout, Partition, SchemaError, Signature};
use tracing::info;

use crate::config::AddConfig;

/// Resolved descriptor of one data object, as handed to a container writer.
#[derive(Debug, Serialize)]
pub struct DescriptorReport {
    /// Target SIF image.
    pub sif_path: PathBuf,
    /// Source of the object contents.
    pub object_path: PathBuf,
    /// Declared data type.
    pub data_type: DataType,
    /// Group ID including the membership bits.
    pub group_id: u32,
    /// Link ID, zero if unlinked.
    pub link_id: u32,
    /// Payload alignment in bytes.
    pub alignment: usize,
    /// Logical name.
    pub name: String,
    /// Extra metadata, hex encoded.
    pub extra: String,
    /// Human-readable decoding of the extra metadata, one line per record.
    pub metadata: Vec<String>,
}

impl DescriptorReport {
    /// Build a report from a resolved descriptor input.
    ///
    /// # Errors
    ///
    /// Returns an error if the extra metadata does not decode as the
    /// records its data type carries.
    pub fn new<R>(sif_path: &Path, object_path: &Path, di: &DescriptorInput<R>) -> Result<Self> {
        Ok(Self {
            sif_path: sif_path.to_path_buf(),
            object_path: object_path.to_path_buf(),
            data_type: di.data_type(),
            group_id: di.group_id(),
            link_id: di.link_id(),
            alignment: di.alignment(),
            name: di.name().to_string(),
            extra: hex::encode_upper(di.extra()),
            metadata: describe_extra(di.data_type(), di.extra())?,
        })
    }

    fn print(&self) {
        let lw = 12;
        let group = self.group_id & !DESCR_GROUP_MASK;

        println!();
        println!("  {:<lw$}{}", "image", self.sif_path.display());
        println!("  {:<lw$}{}", "object", self.object_path.display());
        println!(
            "  {:<lw$}{} ({:#06x})",
            "type",
            self.data_type,
            self.data_type.as_u32()
        );
        println!("  {:<lw$}{} ({:#010x})", "group", group, self.group_id);
        println!("  {:<lw$}{}", "link", self.link_id);
        println!("  {:<lw$}{}", "alignment", self.alignment);
        println!("  {:<lw$}{}", "name", self.name);
        for line in &self.metadata {
            println!("  {:<lw$}{}", "metadata", line);
        }
        if !self.extra.is_empty() {
            println!("  {:<lw$}{}", "extra", self.extra);
        }
        println!();
    }
}

/// Decode the records stored in `extra` for an object of type `t`.
fn describe_extra(t: DataType, extra: &[u8]) -> Result<Vec<String>, SchemaError> {
    match t {
        DataType::Partition if !extra.is_empty() => {
            let p = Partition::from_bytes(extra)?;
            Ok(vec![format!("{} {} {}", p.fs_type, p.part_type, p.arch)])
        }
        DataType::Signature => extra
            .chunks(Signature::SIZE)
            .map(|chunk| -> Result<String, SchemaError> {
                let s = Signature::from_bytes(chunk)?;
                let len = s.entity().iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                Ok(format!(
                    "{} {}",
                    s.hash_type,
                    hex::encode_upper(&s.entity()[..len])
                ))
            })
            .collect(),
        DataType::CryptoMessage => extra
            .chunks(CryptoMessage::SIZE)
            .map(|chunk| -> Result<String, SchemaError> {
                let m = CryptoMessage::from_bytes(chunk)?;
                Ok(format!("{} {}", m.format_type, m.message_type))
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Resolve the descriptor of a data object and report it.
///
/// The object file is opened to capture its handle, but its contents are
/// left for the container writer.
///
/// # Errors
///
/// Returns an error if the object file cannot be opened or any option fails.
pub fn add(config: &AddConfig, json: bool) -> Result<()> {
    let file = File::open(config.object_path())
        .with_context(|| format!("Failed to open {}", config.object_path().display()))?;

    let di = DescriptorInput::new(config.data_type(), &file, config.options().to_vec())
        .context("Failed to build data object descriptor")?;

    info!(
        sif = %config.sif_path().display(),
        object = %config.object_path().display(),
        data_type = %di.data_type(),
        "resolved data object"
    );

    let report = DescriptorReport::new(config.sif_path(), config.object_path(), &di)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sif_core::DescriptorInputOpt;
    use sif_schema::{FsType, HashType, PartType};

    #[test]
    fn report_decodes_partition() {
        let di = DescriptorInput::new(
            DataType::Partition,
            &b""[..],
            [DescriptorInputOpt::partition_metadata(
                FsType::Squash,
                PartType::PrimSys,
                "amd64",
            )],
        )
        .unwrap();

        let report = DescriptorReport::new(Path::new("a.sif"), Path::new("fs.img"), &di).unwrap();
        assert_eq!(report.extra, "0100000002000000303200");
        assert_eq!(report.metadata, ["Squashfs *System amd64"]);
        assert_eq!(report.group_id, DESCR_GROUP_MASK);
    }

    #[test]
    fn report_lists_every_signature() {
        let di = DescriptorInput::new(
            DataType::Signature,
            &b""[..],
            [
                DescriptorInputOpt::signature_metadata(HashType::Sha256, "12045c8c"),
                DescriptorInputOpt::signature_metadata(HashType::Sha384, "ABCDEF"),
            ],
        )
        .unwrap();

        let report = DescriptorReport::new(Path::new("a.sif"), Path::new("sig"), &di).unwrap();
        assert_eq!(report.metadata, ["SHA256 12045C8C", "SHA384 ABCDEF"]);
    }

    #[test]
    fn report_without_metadata() {
        let di = DescriptorInput::new(
            DataType::Deffile,
            &b""[..],
            [DescriptorInputOpt::name("recipe.def")],
        )
        .unwrap();

        let report = DescriptorReport::new(Path::new("a.sif"), Path::new("recipe.def"), &di)
            .unwrap();
        assert!(report.metadata.is_empty());
        assert!(report.extra.is_empty());
        assert_eq!(report.name, "recipe.def");
    }
}
