//! CPU architecture of a partition.
//!
//! SIF stores the architecture as a short zero-padded ASCII tag (`"02\0"`
//! for amd64). Callers name architectures the way Go's `GOARCH` does, so
//! the table here translates between the two.
//!
//! # Example
//!
//! ```
//! use sif_schema::{Arch, sif_arch};
//!
//! let arch: Arch = "amd64".parse().unwrap();
//! assert_eq!(arch.tag(), *b"02\0");
//! assert_eq!(sif_arch("arm64").unwrap(), *b"04\0");
//! assert!(sif_arch("sparc64").is_err());
//! ```

use crate::HDR_ARCH_LEN;
use crate::error::SchemaError;

/// Tag reserved for an unknown architecture. Never written by an encoder.
pub const HDR_ARCH_UNKNOWN: [u8; HDR_ARCH_LEN] = *b"00\0";

/// Architectures with an on-disk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Arch {
    /// 32-bit x86.
    #[serde(rename = "386")]
    I386,
    /// 64-bit x86.
    #[serde(rename = "amd64")]
    Amd64,
    /// 32-bit ARM.
    #[serde(rename = "arm")]
    Arm,
    /// 64-bit ARM.
    #[serde(rename = "arm64")]
    Arm64,
    /// Big-endian 64-bit POWER.
    #[serde(rename = "ppc64")]
    Ppc64,
    /// Little-endian 64-bit POWER.
    #[serde(rename = "ppc64le")]
    Ppc64le,
    /// Big-endian 32-bit MIPS.
    #[serde(rename = "mips")]
    Mips,
    /// Little-endian 32-bit MIPS.
    #[serde(rename = "mipsle")]
    Mipsle,
    /// Big-endian 64-bit MIPS.
    #[serde(rename = "mips64")]
    Mips64,
    /// Little-endian 64-bit MIPS.
    #[serde(rename = "mips64le")]
    Mips64le,
    /// IBM Z.
    #[serde(rename = "s390x")]
    S390x,
}

impl Arch {
    /// Every architecture, ordered by tag. The index plus one is the tag number.
    pub const ALL: [Self; 11] = [
        Self::I386,
        Self::Amd64,
        Self::Arm,
        Self::Arm64,
        Self::Ppc64,
        Self::Ppc64le,
        Self::Mips,
        Self::Mipsle,
        Self::Mips64,
        Self::Mips64le,
        Self::S390x,
    ];

    /// Canonical (`GOARCH`-style) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I386 => "386",
            Self::Amd64 => "amd64",
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::Ppc64 => "ppc64",
            Self::Ppc64le => "ppc64le",
            Self::Mips => "mips",
            Self::Mipsle => "mipsle",
            Self::Mips64 => "mips64",
            Self::Mips64le => "mips64le",
            Self::S390x => "s390x",
        }
    }

    /// Tag number, `1..=11`.
    pub fn code(&self) -> u8 {
        match self {
            Self::I386 => 1,
            Self::Amd64 => 2,
            Self::Arm => 3,
            Self::Arm64 => 4,
            Self::Ppc64 => 5,
            Self::Ppc64le => 6,
            Self::Mips => 7,
            Self::Mipsle => 8,
            Self::Mips64 => 9,
            Self::Mips64le => 10,
            Self::S390x => 11,
        }
    }

    /// Look up an architecture by tag number.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code).checked_sub(1)?).copied()
    }

    /// On-disk tag: two ASCII digits followed by a NUL.
    pub fn tag(&self) -> [u8; HDR_ARCH_LEN] {
        let code = self.code();
        [b'0' + code / 10, b'0' + code % 10, 0]
    }

    /// Parse an on-disk tag.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownArch`] for the unknown tag or any tag
    /// not in the table.
    pub fn from_tag(tag: &[u8; HDR_ARCH_LEN]) -> Result<Self, SchemaError> {
        Self::ALL
            .iter()
            .find(|arch| arch.tag() == *tag)
            .copied()
            .ok_or_else(|| SchemaError::UnknownArch(String::from_utf8_lossy(tag).into_owned()))
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|arch| arch.as_str() == s)
            .copied()
            .ok_or_else(|| SchemaError::UnknownArch(s.to_string()))
    }
}

/// Translate a canonical architecture name into its on-disk tag.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownArch`] if `name` has no mapping. There is
/// no silent fallback to [`HDR_ARCH_UNKNOWN`].
pub fn sif_arch(name: &str) -> Result<[u8; HDR_ARCH_LEN], SchemaError> {
    name.parse::<Arch>().map(|arch| arch.tag())
}
