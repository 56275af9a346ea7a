//! Translation Dumps
//!
//! Each entry takes two consecutive lines: the original text, then its
//! replacement. Line breaks inside a text are written as `\n`.
//!
//! ```text
//! Hello, world!
//! Olá, mundo!
//! Go *!
//! Vai *!
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{TranslationEntry, dump_lines, escape_line, unescape_line};
use crate::error::Result;

/// Read a translation Dump from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not UTF-8.
pub fn read_translation_dump<P: AsRef<Path>>(path: P) -> Result<Vec<TranslationEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let entries = parse_translation_dump(&content);
    tracing::debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse translation Dump content. Mask lines are kept verbatim.
pub fn parse_translation_dump(content: &str) -> Vec<TranslationEntry> {
    let lines: Vec<&str> = dump_lines(content).collect();
    let pairs = lines.chunks_exact(2);
    if let [orphan] = pairs.remainder() {
        tracing::warn!("Ignoring unpaired trailing line: {:?}", orphan);
    }

    pairs
        .map(|pair| TranslationEntry::new(unescape_line(pair[0]), unescape_line(pair[1])))
        .collect()
}

/// Write a whole translation Dump, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_translation_dump<P: AsRef<Path>>(path: P, entries: &[TranslationEntry]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in entries {
        write_entry(&mut writer, entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append one pair to a translation Dump, creating it if needed
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn append_translation<P: AsRef<Path>>(path: P, entry: &TranslationEntry) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_entry(&mut writer, entry)?;
    writer.flush()?;
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, entry: &TranslationEntry) -> Result<()> {
    writeln!(writer, "{}", escape_line(&entry.original, false))?;
    writeln!(writer, "{}", escape_line(&entry.replacement, false))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_pairs() {
        let entries = parse_translation_dump("Hello\nOlá\nGo *!\nVai *!\n");
        assert_eq!(
            entries,
            vec![
                TranslationEntry::new("Hello", "Olá"),
                TranslationEntry::new("Go *!", "Vai *!"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_orphan_line() {
        let entries = parse_translation_dump("a\nb\nc");
        assert_eq!(entries, vec![TranslationEntry::new("a", "b")]);
    }

    #[test]
    fn test_multiline_text_survives_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Strings.lst");
        let entries = vec![
            TranslationEntry::new("First line\nSecond line", "Primeira\nSegunda"),
            TranslationEntry::new("", "empty original"),
        ];

        write_translation_dump(&path, &entries[..1]).unwrap();
        append_translation(&path, &entries[1]).unwrap();

        assert_eq!(read_translation_dump(&path).unwrap(), entries);
    }
}
