//! SRL3 file writing
//!
//! The file is written to a temporary sibling and renamed over the target,
//! so a failed build never leaves the workspace without a database.

use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::NamedTempFile;

use super::{SRL3_VERSION, SrlData};
use crate::error::{Error, Result};
use crate::formats::SRL3_SIGNATURE;
use crate::formats::common::{write_char, write_cstring, write_string_u16, write_string_u32};

/// Write an SRL3 file to disk, atomically replacing any existing file
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be replaced.
pub fn write_srl3<P: AsRef<Path>>(path: P, data: &SrlData) -> Result<()> {
    let path = path.as_ref();
    let bytes = serialize_srl3(data)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;
    Ok(())
}

/// Serialize SRL3 data to bytes
///
/// # Errors
/// Returns an error if a string does not fit its length prefix, a name
/// contains a NUL, or a char table entry is outside the BMP.
pub fn serialize_srl3(data: &SrlData) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    output.write_u32::<LittleEndian>(SRL3_SIGNATURE)?;
    output.write_u16::<LittleEndian>(SRL3_VERSION)?;

    write_count(&mut output, data.databases.len())?;
    for database in &data.databases {
        write_cstring(&mut output, &database.name)?;
        write_count(&mut output, database.entries.len())?;
        for entry in &database.entries {
            write_string_u16(&mut output, &entry.original)?;
            write_string_u16(&mut output, &entry.replacement)?;
        }
    }

    write_count(&mut output, data.chars.len())?;
    for pair in &data.chars {
        write_char(&mut output, pair.original)?;
        write_char(&mut output, pair.encoded)?;
    }

    write_count(&mut output, data.unknown.len())?;
    for unk in &data.unknown {
        output.write_u16::<LittleEndian>(unk.code)?;
        write_char(&mut output, unk.literal)?;
    }

    write_count(&mut output, data.replaces.len())?;
    for pair in &data.replaces {
        write_string_u32(&mut output, &pair.from)?;
        write_string_u32(&mut output, &pair.to)?;
    }

    Ok(output)
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    let count = u32::try_from(count).map_err(|_| Error::StringTooLong {
        len: count,
        max: u32::MAX as usize,
    })?;
    writer.write_u32::<LittleEndian>(count)?;
    Ok(())
}
