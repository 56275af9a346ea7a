//! TLBot translation cache (`TLBC`)
//!
//! `"TLBC"`, then two `u32`-prefixed arrays of NUL-terminated strings:
//! originals and replacements.

use std::io::Cursor;

use crate::dump::{DumpSet, TranslationDumps, TranslationEntry};
use crate::error::Result;

use super::read_string_pairs;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TlbcCache {
    pub entries: Vec<TranslationEntry>,
}

impl TlbcCache {
    /// Parse a TLBot cache. The signature is assumed already checked.
    ///
    /// # Errors
    /// Returns an error if the data is truncated or not UTF-8.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        cursor.set_position(4);
        Ok(Self {
            entries: read_string_pairs(&mut cursor)?,
        })
    }

    /// Everything goes to the aggregate Dump; a cache has no other tables
    #[must_use]
    pub fn migrate(self) -> DumpSet {
        DumpSet {
            translations: TranslationDumps::Aggregate(self.entries),
            chars: Vec::new(),
            unknown: Vec::new(),
            replaces: Vec::new(),
        }
    }
}
