//! Binary primitives shared by every SRL generation
//!
//! All integers are little-endian. Strings are UTF-8 and come in three
//! shapes: NUL-terminated, `u16` length-prefixed and `u32` length-prefixed.
//! Characters in char tables are single UTF-16 code units.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Peek the leading 4-byte signature without consuming anything.
///
/// Files shorter than four bytes yield whatever bytes exist, zero-padded.
#[must_use]
pub fn peek_signature(data: &[u8]) -> u32 {
    let mut magic = [0u8; 4];
    let len = data.len().min(4);
    magic[..len].copy_from_slice(&data[..len]);
    u32::from_le_bytes(magic)
}

/// Turn a short read into [`Error::UnexpectedEof`].
pub fn map_eof(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(err)
    }
}

pub fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    reader.read_u16::<LittleEndian>().map_err(map_eof)
}

pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(map_eof)
}

fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).map_err(map_eof)?;
    Ok(buf)
}

/// Read a NUL-terminated UTF-8 string
pub fn read_cstring<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        let byte = reader.read_u8().map_err(map_eof)?;
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }
    Ok(String::from_utf8(bytes)?)
}

/// Write a NUL-terminated UTF-8 string
///
/// Anything after an embedded NUL would be lost on read, so it is rejected.
pub fn write_cstring<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::EmbeddedNul(value.to_string()));
    }
    writer.write_all(value.as_bytes())?;
    writer.write_u8(0)?;
    Ok(())
}

/// Read a `u16` length-prefixed UTF-8 string
pub fn read_string_u16<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_u16(reader)? as usize;
    Ok(String::from_utf8(read_bytes(reader, len)?)?)
}

/// Write a `u16` length-prefixed UTF-8 string
pub fn write_string_u16<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| Error::StringTooLong {
        len: value.len(),
        max: u16::MAX as usize,
    })?;
    writer.write_u16::<LittleEndian>(len)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

/// Read a `u32` length-prefixed UTF-8 string
pub fn read_string_u32<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_u32(reader)? as usize;
    Ok(String::from_utf8(read_bytes(reader, len)?)?)
}

/// Write a `u32` length-prefixed UTF-8 string
pub fn write_string_u32<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let len = u32::try_from(value.len()).map_err(|_| Error::StringTooLong {
        len: value.len(),
        max: u32::MAX as usize,
    })?;
    writer.write_u32::<LittleEndian>(len)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

/// Read one UTF-16 code unit as a `char`
pub fn read_char<R: Read>(reader: &mut R) -> Result<char> {
    let unit = read_u16(reader)?;
    char::from_u32(u32::from(unit)).ok_or(Error::InvalidChar(unit))
}

/// Write a `char` as one UTF-16 code unit
pub fn write_char<W: Write>(writer: &mut W, value: char) -> Result<()> {
    let unit = u16::try_from(u32::from(value)).map_err(|_| Error::CharOutOfRange(value))?;
    writer.write_u16::<LittleEndian>(unit)?;
    Ok(())
}

/// Read a `u32` count followed by that many items
pub fn read_prefixed_array<R, T, F>(reader: &mut R, mut read_item: F) -> Result<Vec<T>>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T>,
{
    let count = read_u32(reader)? as usize;
    // Counts come from untrusted data; let the reads fail instead of over-allocating
    let mut items = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        items.push(read_item(reader)?);
    }
    Ok(items)
}
