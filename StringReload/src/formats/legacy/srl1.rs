//! SRL1: a single flat string table plus char and replace tables

use std::io::Cursor;

use crate::dump::{DumpSet, TranslationDumps, TranslationEntry};
use crate::error::Result;

use super::{LegacyTables, read_string_pairs};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Srl1Data {
    pub entries: Vec<TranslationEntry>,
    pub tables: LegacyTables,
}

impl Srl1Data {
    /// Parse an SRL1 database. The signature is assumed already checked.
    ///
    /// # Errors
    /// Returns an error if the data is truncated or malformed.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        cursor.set_position(4);
        let entries = read_string_pairs(&mut cursor)?;
        let tables = LegacyTables::read(&mut cursor)?;
        Ok(Self { entries, tables })
    }

    #[must_use]
    pub fn migrate(self) -> DumpSet {
        DumpSet {
            chars: self.tables.chars(),
            unknown: self.tables.unknown(),
            replaces: self.tables.replaces(),
            translations: TranslationDumps::Aggregate(self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::{CharPair, ReplacePair, UnknownChar};
    use crate::formats::legacy::test_support::{cstrings, tables};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_migrate() {
        let mut data = b"SRL\0".to_vec();
        cstrings(&mut data, &["Start", "Quit"]);
        cstrings(&mut data, &["Iniciar", "Sair"]);
        tables(&mut data, &[('á', '¡')], &[("...", "…")]);

        let dumps = Srl1Data::parse(&data).unwrap().migrate();
        assert_eq!(
            dumps.translations,
            TranslationDumps::Aggregate(vec![
                TranslationEntry::new("Start", "Iniciar"),
                TranslationEntry::new("Quit", "Sair"),
            ])
        );
        assert_eq!(dumps.chars, vec![CharPair { original: 'á', encoded: '¡' }]);
        assert_eq!(dumps.unknown, vec![UnknownChar { code: 0x81, literal: '?' }]);
        assert_eq!(dumps.replaces, vec![ReplacePair::new("...", "…")]);
    }

    #[test]
    fn test_truncated_tables_fail() {
        let mut data = b"SRL\0".to_vec();
        cstrings(&mut data, &["a"]);
        cstrings(&mut data, &["b"]);
        assert!(Srl1Data::parse(&data).is_err());
    }
}
