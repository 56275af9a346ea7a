//! SRL3, the current database format
//!
//! ```text
//! bytes[4]  signature "SRL3"
//! u16       version (0)
//! u32       database_count
//!   cstring   name
//!   u32       entry_count
//!     entry_count × (u16-len original, u16-len replacement)
//! u32       char_count × (original u16, encoded u16)
//! u32       unknown_count × (code u16, literal u16)
//! u32       replace_count × (u32-len from, u32-len to)
//! ```

mod reader;
mod writer;

pub use reader::{parse_srl3_bytes, read_srl3, read_version};
pub use writer::{serialize_srl3, write_srl3};

use serde::Serialize;

use crate::dump::{CharPair, ReplacePair, TranslationEntry, UnknownChar};

/// The only SRL3 version understood
pub const SRL3_VERSION: u16 = 0;

/// One named string table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SrlDatabase {
    pub name: String,
    pub entries: Vec<TranslationEntry>,
}

impl SrlDatabase {
    pub fn new(name: impl Into<String>, entries: Vec<TranslationEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// Full contents of an SRL3 file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SrlData {
    pub databases: Vec<SrlDatabase>,
    pub chars: Vec<CharPair>,
    pub unknown: Vec<UnknownChar>,
    pub replaces: Vec<ReplacePair>,
}

impl SrlData {
    /// Total number of translation entries across all databases
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.databases.iter().map(|db| db.entries.len()).sum()
    }
}
