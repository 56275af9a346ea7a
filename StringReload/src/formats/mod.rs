//! SRL database file formats
//!
//! Four generations exist. Only [`srl3`] is written; the others are read so
//! they can be migrated back into Dumps (see [`crate::migrate`]).
//!
//! | Generation | Signature | Bytes |
//! |---|---|---|
//! | TLBot cache | `0x43424C54` | `TLBC` |
//! | SRL1 | `0x004C5253` | `SRL\0` |
//! | SRL2 | `0x324C5253` | `SRL2` |
//! | SRL3 | `0x334C5253` | `SRL3` |

pub mod common;
pub mod legacy;
pub mod srl3;

use crate::error::{Error, Result};

/// "TLBC" magic signature (little-endian)
pub const TLBC_SIGNATURE: u32 = 0x43424C54;

/// "SRL\0" magic signature (little-endian)
pub const SRL1_SIGNATURE: u32 = 0x004C5253;

/// "SRL2" magic signature (little-endian)
pub const SRL2_SIGNATURE: u32 = 0x324C5253;

/// "SRL3" magic signature (little-endian)
pub const SRL3_SIGNATURE: u32 = 0x334C5253;

/// The generation of a database file, decided by its leading signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatGeneration {
    /// TLBot translation cache
    Legacy,
    /// First SRL database: one flat string table
    Gen1,
    /// Second SRL database: several unnamed string tables
    Gen2,
    /// Current SRL database: named string tables and a version field
    Gen3,
}

impl FormatGeneration {
    /// Detect the generation from the leading bytes.
    ///
    /// This only peeks at the signature; the SRL3 version field is checked by
    /// the SRL3 reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptedData`] for an unrecognized signature.
    pub fn detect(data: &[u8]) -> Result<Self> {
        let signature = common::peek_signature(data);
        match signature {
            TLBC_SIGNATURE => Ok(Self::Legacy),
            SRL1_SIGNATURE => Ok(Self::Gen1),
            SRL2_SIGNATURE => Ok(Self::Gen2),
            SRL3_SIGNATURE if data.len() >= 4 => Ok(Self::Gen3),
            _ => Err(Error::CorruptedData { signature }),
        }
    }

    #[must_use]
    pub fn signature(self) -> u32 {
        match self {
            Self::Legacy => TLBC_SIGNATURE,
            Self::Gen1 => SRL1_SIGNATURE,
            Self::Gen2 => SRL2_SIGNATURE,
            Self::Gen3 => SRL3_SIGNATURE,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "TLBot Cache",
            Self::Gen1 => "SRL1",
            Self::Gen2 => "SRL2",
            Self::Gen3 => "SRL3",
        }
    }

    /// Whether a file of this generation must be migrated before loading
    #[must_use]
    pub fn needs_migration(self) -> bool {
        self != Self::Gen3
    }
}

impl std::fmt::Display for FormatGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_generations() {
        assert_eq!(FormatGeneration::detect(b"TLBC....").unwrap(), FormatGeneration::Legacy);
        assert_eq!(FormatGeneration::detect(b"SRL\0....").unwrap(), FormatGeneration::Gen1);
        assert_eq!(FormatGeneration::detect(b"SRL2....").unwrap(), FormatGeneration::Gen2);
        assert_eq!(FormatGeneration::detect(b"SRL3\0\0").unwrap(), FormatGeneration::Gen3);
    }

    #[test]
    fn test_detect_unknown_signature() {
        let err = FormatGeneration::detect(b"LSOF\x06\0\0\0").unwrap_err();
        assert!(matches!(err, Error::CorruptedData { signature: 0x464F534C }));
        assert!(FormatGeneration::detect(b"").is_err());
    }

    #[test]
    fn test_signature_matches_magic_bytes() {
        assert_eq!(FormatGeneration::Gen3.signature().to_le_bytes(), *b"SRL3");
        assert_eq!(FormatGeneration::Gen1.signature().to_le_bytes(), *b"SRL\0");
        assert_eq!(FormatGeneration::Legacy.signature().to_le_bytes(), *b"TLBC");
    }
}
