//! Character-remap Dump
//!
//! Two line shapes are understood, anything else is ignored:
//!
//! - `X=Y`: the original character `X` is rendered by the target as `Y`
//! - `X=0xHHHH`: the target character code `HHHH` is displayed as `X`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{CharPair, UnknownChar, dump_lines};
use crate::error::Result;

/// Read a character-remap Dump from disk
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_char_dump<P: AsRef<Path>>(path: P) -> Result<(Vec<CharPair>, Vec<UnknownChar>)> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_char_dump(&content))
}

fn is_bmp(c: char) -> bool {
    u32::from(c) <= 0xFFFF
}

/// Parse character-remap Dump content into remap pairs and unknown chars
pub fn parse_char_dump(content: &str) -> (Vec<CharPair>, Vec<UnknownChar>) {
    let mut chars = Vec::new();
    let mut unknown = Vec::new();

    for line in dump_lines(content) {
        let mut it = line.chars();
        let (Some(first), Some('=')) = (it.next(), it.next()) else {
            continue;
        };
        let value = it.as_str();

        // Stored as single UTF-16 code units
        if !is_bmp(first) || value.chars().any(|c| !is_bmp(c)) {
            tracing::warn!("Ignoring char reload outside the BMP: {:?}", line);
            continue;
        }

        let mut value_chars = value.chars();
        if let (Some(encoded), None) = (value_chars.next(), value_chars.next()) {
            chars.push(CharPair {
                original: first,
                encoded,
            });
            continue;
        }

        if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            match u16::from_str_radix(hex.trim(), 16) {
                Ok(code) => unknown.push(UnknownChar {
                    code,
                    literal: first,
                }),
                Err(e) => tracing::warn!("Ignoring char reload {:?}: {}", line, e),
            }
        }
    }

    (chars, unknown)
}

/// Write a character-remap Dump, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_char_dump<P: AsRef<Path>>(
    path: P,
    chars: &[CharPair],
    unknown: &[UnknownChar],
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for pair in chars {
        writeln!(writer, "{}={}", pair.original, pair.encoded)?;
    }
    for unk in unknown {
        writeln!(writer, "{}=0x{:04X}", unk.literal, unk.code)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_both_shapes() {
        let (chars, unknown) = parse_char_dump("á=Ã\n?=0x0081\nnot a remap\nab=c\n");
        assert_eq!(
            chars,
            vec![CharPair {
                original: 'á',
                encoded: 'Ã'
            }]
        );
        assert_eq!(
            unknown,
            vec![UnknownChar {
                code: 0x81,
                literal: '?'
            }]
        );
    }

    #[test]
    fn test_equals_sign_as_literal() {
        let (_, unknown) = parse_char_dump("==0x003D");
        assert_eq!(unknown, vec![UnknownChar { code: 0x3D, literal: '=' }]);
    }

    #[test]
    fn test_non_bmp_lines_ignored() {
        let (chars, unknown) = parse_char_dump("á=¡\na=😀\n😀=0x0081\n");
        assert_eq!(chars, vec![CharPair { original: 'á', encoded: '¡' }]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_bad_hex_ignored() {
        let (chars, unknown) = parse_char_dump("x=0xZZZZ\n");
        assert!(chars.is_empty());
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Chars.lst");
        let chars = vec![CharPair { original: 'ç', encoded: '¢' }];
        let unknown = vec![UnknownChar { code: 0xE000, literal: '♥' }];

        write_char_dump(&path, &chars, &unknown).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ç=¢\n♥=0xE000\n");
        assert_eq!(read_char_dump(&path).unwrap(), (chars, unknown));
    }
}
