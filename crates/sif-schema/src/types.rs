//! Enumerations stored in descriptors and metadata records.

use crate::error::SchemaError;

/// Declares a `u32`-backed on-disk enumeration.
///
/// Each variant carries its wire value and the label shown in listings.
/// Decoding an unlisted value is an error rather than a fallback.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[repr(u32)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// Every variant, in wire-value order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Numeric value stored on disk.
            pub const fn as_u32(self) -> u32 {
                self as u32
            }

            /// Label used when listing objects.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = SchemaError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(SchemaError::UnknownValue { kind: $kind, value }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Kind of content held by a data object.
    ///
    /// The declared type decides which metadata record, if any, may be
    /// attached to the object's descriptor.
    DataType ("data type") {
        /// Definition file used to build the image.
        Deffile = 0x4001 => "Def.FILE",
        /// Environment variables.
        EnvVar = 0x4002 => "Env.Vars",
        /// JSON labels.
        Labels = 0x4003 => "JSON.Labels",
        /// Filesystem partition image.
        Partition = 0x4004 => "FS",
        /// Signature over other data objects.
        Signature = 0x4005 => "Signature",
        /// Arbitrary JSON document.
        GenericJson = 0x4006 => "JSON.Generic",
        /// Arbitrary raw bytes.
        Generic = 0x4007 => "Generic/Raw",
        /// Cryptographic message (e.g. a clear-signed digest list).
        CryptoMessage = 0x4008 => "Cryptographic Message",
    }
}

wire_enum! {
    /// Filesystem held by a partition.
    FsType ("filesystem type") {
        /// Squashfs image.
        Squash = 1 => "Squashfs",
        /// Ext3 image.
        Ext3 = 2 => "Ext3",
        /// Immutable object archive.
        ImmuObj = 3 => "Data.Archive",
        /// Raw data.
        Raw = 4 => "Raw.Data",
        /// Encrypted squashfs image.
        EncryptedSquashfs = 5 => "Encrypted squashfs",
    }
}

wire_enum! {
    /// Role a partition plays in the container.
    PartType ("partition type") {
        /// System partition.
        System = 1 => "System",
        /// Primary system partition.
        PrimSys = 2 => "*System",
        /// Data partition.
        Data = 3 => "Data",
        /// Overlay partition.
        Overlay = 4 => "Overlay",
    }
}

wire_enum! {
    /// Hash algorithm used when producing a signature.
    HashType ("hash type") {
        /// SHA-256.
        Sha256 = 1 => "SHA256",
        /// SHA-384.
        Sha384 = 2 => "SHA384",
        /// SHA-512.
        Sha512 = 3 => "SHA512",
        /// `BLAKE2s`.
        Blake2s = 4 => "BLAKE2S",
        /// `BLAKE2b`.
        Blake2b = 5 => "BLAKE2B",
    }
}

wire_enum! {
    /// Encoding of a cryptographic message.
    FormatType ("format type") {
        /// `OpenPGP` packets.
        OpenPgp = 1 => "OpenPGP",
        /// PEM block.
        Pem = 2 => "PEM",
    }
}

wire_enum! {
    /// Kind of cryptographic message.
    MessageType ("message type") {
        /// Clear-signed message.
        ClearSignature = 0x100 => "Clear Signature",
        /// RSA-OAEP encrypted message.
        RsaOaep = 0x200 => "RSA-OAEP",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_values_match_format() {
        assert_eq!(DataType::Deffile.as_u32(), 0x4001);
        assert_eq!(DataType::Partition.as_u32(), 0x4004);
        assert_eq!(DataType::CryptoMessage.as_u32(), 0x4008);
        assert_eq!(DataType::ALL.len(), 8);
    }

    #[test]
    fn try_from_accepts_every_listed_value() {
        for t in DataType::ALL {
            assert_eq!(DataType::try_from(t.as_u32()).unwrap(), *t);
        }
        for m in MessageType::ALL {
            assert_eq!(MessageType::try_from(m.as_u32()).unwrap(), *m);
        }
    }

    #[test]
    fn try_from_rejects_unknown_values() {
        let err = FsType::try_from(0).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownValue {
                kind: "filesystem type",
                value: 0
            }
        ));
        assert!(HashType::try_from(6).is_err());
        assert!(MessageType::try_from(1).is_err());
    }

    #[test]
    fn display_uses_listing_labels() {
        assert_eq!(DataType::Partition.to_string(), "FS");
        assert_eq!(PartType::PrimSys.to_string(), "*System");
        assert_eq!(FormatType::OpenPgp.to_string(), "OpenPGP");
        assert_eq!(MessageType::RsaOaep.to_string(), "RSA-OAEP");
    }
}
