//! Arch command

use anyhow::Result;
use serde::Serialize;
use sif_schema::Arch;

#[derive(Serialize)]
struct ArchEntry {
    code: u8,
    name: &'static str,
    tag: String,
}

/// List the architecture codes accepted by `--partarch`.
///
/// # Errors
///
/// Returns an error if the JSON listing cannot be serialized.
pub fn arch(json: bool) -> Result<()> {
    let entries: Vec<ArchEntry> = Arch::ALL
        .iter()
        .map(|arch| ArchEntry {
            code: arch.code(),
            name: arch.as_str(),
            tag: String::from_utf8_lossy(&arch.tag()[..2]).into_owned(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!("  {:>4}  {:<10}{}", entry.code, entry.name, entry.tag);
    }
    Ok(())
}
