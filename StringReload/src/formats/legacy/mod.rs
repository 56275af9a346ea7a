//! Deprecated but supported database formats
//!
//! These are only ever read. Each one converts into a [`DumpSet`], which is
//! written back to the workspace and recompiled as SRL3.

mod srl1;
mod srl2;
mod tlbc;

pub use srl1::Srl1Data;
pub use srl2::Srl2Data;
pub use tlbc::TlbcCache;

use std::io::Read;

use crate::dump::{CharPair, DumpSet, ReplacePair, TranslationEntry, UnknownChar};
use crate::error::{Error, Result};
use crate::formats::FormatGeneration;
use crate::formats::common::{peek_signature, read_char, read_cstring, read_prefixed_array, read_u16};

/// A decoded legacy database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyData {
    Tlbc(TlbcCache),
    Srl1(Srl1Data),
    Srl2(Srl2Data),
}

impl LegacyData {
    /// Decode `data` as the given legacy generation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptedData`] when asked to decode SRL3, and any
    /// read error of the generation's decoder.
    pub fn parse(generation: FormatGeneration, data: &[u8]) -> Result<Self> {
        match generation {
            FormatGeneration::Legacy => Ok(Self::Tlbc(TlbcCache::parse(data)?)),
            FormatGeneration::Gen1 => Ok(Self::Srl1(Srl1Data::parse(data)?)),
            FormatGeneration::Gen2 => Ok(Self::Srl2(Srl2Data::parse(data)?)),
            FormatGeneration::Gen3 => Err(Error::CorruptedData {
                signature: peek_signature(data),
            }),
        }
    }

    #[must_use]
    pub fn generation(&self) -> FormatGeneration {
        match self {
            Self::Tlbc(_) => FormatGeneration::Legacy,
            Self::Srl1(_) => FormatGeneration::Gen1,
            Self::Srl2(_) => FormatGeneration::Gen2,
        }
    }

    /// Convert into the equivalent set of Dumps
    #[must_use]
    pub fn migrate(self) -> DumpSet {
        match self {
            Self::Tlbc(cache) => cache.migrate(),
            Self::Srl1(data) => data.migrate(),
            Self::Srl2(data) => data.migrate(),
        }
    }
}

/// Read two independently prefixed cstring arrays and pair them up
pub(crate) fn read_string_pairs<R: Read>(reader: &mut R) -> Result<Vec<TranslationEntry>> {
    let originals = read_prefixed_array(reader, read_cstring)?;
    let replacements = read_prefixed_array(reader, read_cstring)?;
    if originals.len() != replacements.len() {
        tracing::warn!(
            "String array length mismatch ({} originals, {} replacements), extra entries dropped",
            originals.len(),
            replacements.len()
        );
    }
    Ok(originals
        .into_iter()
        .zip(replacements)
        .map(|(original, replacement)| TranslationEntry {
            original,
            replacement,
        })
        .collect())
}

/// Char, unknown-char and replace tables trailing SRL1 and SRL2 files.
///
/// Every column is its own `u32`-prefixed array, so columns of one table can
/// disagree in length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyTables {
    pub ori_letters: Vec<char>,
    pub memory_letters: Vec<char>,
    pub unk_chars: Vec<u16>,
    pub unk_reps: Vec<char>,
    pub rep_ori: Vec<String>,
    pub rep_trg: Vec<String>,
}

impl LegacyTables {
    pub(crate) fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            ori_letters: read_prefixed_array(reader, read_char)?,
            memory_letters: read_prefixed_array(reader, read_char)?,
            unk_chars: read_prefixed_array(reader, read_u16)?,
            unk_reps: read_prefixed_array(reader, read_char)?,
            rep_ori: read_prefixed_array(reader, read_cstring)?,
            rep_trg: read_prefixed_array(reader, read_cstring)?,
        })
    }

    pub fn chars(&self) -> Vec<CharPair> {
        self.ori_letters
            .iter()
            .zip(&self.memory_letters)
            .map(|(&original, &encoded)| CharPair { original, encoded })
            .collect()
    }

    pub fn unknown(&self) -> Vec<UnknownChar> {
        self.unk_chars
            .iter()
            .zip(&self.unk_reps)
            .map(|(&code, &literal)| UnknownChar { code, literal })
            .collect()
    }

    /// Replace pairs, best effort: a pair with a missing side is skipped
    pub fn replaces(&self) -> Vec<ReplacePair> {
        let count = self.rep_ori.len().max(self.rep_trg.len());
        let mut pairs = Vec::with_capacity(count);
        for i in 0..count {
            match (self.rep_ori.get(i), self.rep_trg.get(i)) {
                (Some(from), Some(to)) => pairs.push(ReplacePair::new(from.clone(), to.clone())),
                _ => tracing::warn!("Skipping incomplete replace pair {}", i),
            }
        }
        pairs
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_skip_incomplete_pairs() {
        let tables = LegacyTables {
            rep_ori: vec!["a".into(), "b".into()],
            rep_trg: vec!["A".into()],
            ..LegacyTables::default()
        };
        assert_eq!(tables.replaces(), vec![ReplacePair::new("a", "A")]);
    }

    #[test]
    fn test_chars_zip_columns() {
        let tables = LegacyTables {
            ori_letters: vec!['á', 'é', 'í'],
            memory_letters: vec!['1', '2'],
            unk_chars: vec![0x81],
            unk_reps: vec!['?'],
            ..LegacyTables::default()
        };
        assert_eq!(tables.chars().len(), 2);
        assert_eq!(tables.unknown(), vec![UnknownChar { code: 0x81, literal: '?' }]);
    }

    #[test]
    fn test_parse_refuses_current_generation() {
        let err = LegacyData::parse(FormatGeneration::Gen3, b"SRL3\0\0").unwrap_err();
        assert!(matches!(err, Error::CorruptedData { .. }));
    }
}
