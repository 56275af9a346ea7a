//! SRL3 file reading and parsing

use std::io::{Cursor, Read};
use std::path::Path;

use super::{SRL3_VERSION, SrlData, SrlDatabase};
use crate::dump::{CharPair, ReplacePair, TranslationEntry, UnknownChar};
use crate::error::{Error, Result};
use crate::formats::SRL3_SIGNATURE;
use crate::formats::common::{
    peek_signature, read_char, read_cstring, read_prefixed_array, read_string_u16,
    read_string_u32, read_u16, read_u32,
};

/// Read an SRL3 file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, and any error of
/// [`parse_srl3_bytes`].
pub fn read_srl3<P: AsRef<Path>>(path: P) -> Result<SrlData> {
    let buffer = std::fs::read(path)?;
    parse_srl3_bytes(&buffer)
}

/// Read the signature and version header.
///
/// # Errors
///
/// Returns [`Error::CorruptedData`] if the signature is not SRL3 and
/// [`Error::UnsupportedVersion`] if the version is not 0.
pub fn read_version(data: &[u8]) -> Result<u16> {
    let signature = peek_signature(data);
    if signature != SRL3_SIGNATURE || data.len() < 4 {
        return Err(Error::CorruptedData { signature });
    }

    let mut cursor = Cursor::new(&data[4..]);
    let version = read_u16(&mut cursor)?;
    if version != SRL3_VERSION {
        return Err(Error::UnsupportedVersion { version });
    }
    Ok(version)
}

/// Parse SRL3 data from bytes
///
/// # Errors
///
/// Returns [`Error::CorruptedData`] or [`Error::UnsupportedVersion`] for a
/// bad header, [`Error::Load`] when a database entry cannot be read, and
/// [`Error::LoadTable`] for anything else past the header.
pub fn parse_srl3_bytes(data: &[u8]) -> Result<SrlData> {
    read_version(data)?;
    let mut cursor = Cursor::new(data);
    cursor.set_position(6);

    let database_count = read_u32(&mut cursor).map_err(table("database"))? as usize;
    let mut databases = Vec::with_capacity(database_count.min(256));
    for index in 0..database_count {
        databases.push(read_database(&mut cursor, index)?);
    }

    let chars = read_prefixed_array(&mut cursor, |r| {
        Ok(CharPair {
            original: read_char(r)?,
            encoded: read_char(r)?,
        })
    })
    .map_err(table("char"))?;

    let unknown = read_prefixed_array(&mut cursor, |r| {
        Ok(UnknownChar {
            code: read_u16(r)?,
            literal: read_char(r)?,
        })
    })
    .map_err(table("unknown char"))?;

    let replaces = read_prefixed_array(&mut cursor, |r| {
        Ok(ReplacePair::new(read_string_u32(r)?, read_string_u32(r)?))
    })
    .map_err(table("replace"))?;

    let trailing = data.len() as u64 - cursor.position();
    if trailing > 0 {
        tracing::warn!("Ignoring {} trailing bytes after the SRL3 tables", trailing);
    }

    Ok(SrlData {
        databases,
        chars,
        unknown,
        replaces,
    })
}

fn table(table: &'static str) -> impl Fn(Error) -> Error {
    move |e| Error::LoadTable {
        table,
        message: e.to_string(),
    }
}

fn read_database<R: Read>(reader: &mut R, database: usize) -> Result<SrlDatabase> {
    let context = |entry: usize| {
        move |e: Error| Error::Load {
            database,
            entry,
            message: e.to_string(),
        }
    };

    let name = read_cstring(reader).map_err(context(0))?;
    let count = read_u32(reader).map_err(context(0))? as usize;

    let mut entries = Vec::with_capacity(count.min(4096));
    for entry in 0..count {
        let original = read_string_u16(reader).map_err(context(entry))?;
        let replacement = read_string_u16(reader).map_err(context(entry))?;
        entries.push(TranslationEntry {
            original,
            replacement,
        });
    }

    Ok(SrlDatabase { name, entries })
}
