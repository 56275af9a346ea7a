//! SRL2: several unnamed string tables plus char and replace tables
//!
//! The database array has a `u16` count; each database is a pair of
//! `u32`-prefixed cstring arrays. Databases are identified only by index,
//! which becomes their id in the per-database Dump names.

use std::io::Cursor;

use crate::dump::{DumpSet, TranslationDumps, TranslationEntry};
use crate::error::Result;
use crate::formats::common::read_u16;

use super::{LegacyTables, read_string_pairs};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Srl2Data {
    pub databases: Vec<Vec<TranslationEntry>>,
    pub tables: LegacyTables,
}

impl Srl2Data {
    /// Parse an SRL2 database. The signature is assumed already checked.
    ///
    /// # Errors
    /// Returns an error if the data is truncated or malformed.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        cursor.set_position(4);

        let count = read_u16(&mut cursor)?;
        let mut databases = Vec::with_capacity(count as usize);
        for _ in 0..count {
            databases.push(read_string_pairs(&mut cursor)?);
        }

        let tables = LegacyTables::read(&mut cursor)?;
        Ok(Self { databases, tables })
    }

    #[must_use]
    pub fn migrate(self) -> DumpSet {
        let databases = self
            .databases
            .into_iter()
            .enumerate()
            .map(|(index, entries)| (index.to_string(), entries))
            .collect();

        DumpSet {
            chars: self.tables.chars(),
            unknown: self.tables.unknown(),
            replaces: self.tables.replaces(),
            translations: TranslationDumps::PerDatabase(databases),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::legacy::test_support::{cstrings, tables};
    use byteorder::{LittleEndian, WriteBytesExt};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_migrate() {
        let mut data = b"SRL2".to_vec();
        data.write_u16::<LittleEndian>(2).unwrap();
        cstrings(&mut data, &["Menu"]);
        cstrings(&mut data, &["Menu PT"]);
        cstrings(&mut data, &["Hello", "Bye"]);
        cstrings(&mut data, &["Olá", "Tchau"]);
        tables(&mut data, &[], &[]);

        let parsed = Srl2Data::parse(&data).unwrap();
        assert_eq!(parsed.databases.len(), 2);

        let dumps = parsed.migrate();
        let TranslationDumps::PerDatabase(databases) = dumps.translations else {
            panic!("SRL2 must migrate to per-database dumps");
        };
        assert_eq!(databases[0].0, "0");
        assert_eq!(databases[1].0, "1");
        assert_eq!(databases[1].1[0], TranslationEntry::new("Hello", "Olá"));
        assert!(dumps.chars.is_empty());
        assert_eq!(dumps.unknown.len(), 1);
    }
}
