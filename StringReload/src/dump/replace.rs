//! Replace Dump: one `from=to` pair per line, `\=` for a literal `=` in `from`

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{ReplacePair, dump_lines, escape_line, unescape_line};
use crate::error::Result;

/// Read a replace Dump from disk
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_replace_dump<P: AsRef<Path>>(path: P) -> Result<Vec<ReplacePair>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_replace_dump(&content))
}

/// Parse replace Dump content. Lines without a separator are skipped.
pub fn parse_replace_dump(content: &str) -> Vec<ReplacePair> {
    dump_lines(content)
        .filter_map(|line| {
            let split = separator_index(line)?;
            Some(ReplacePair::new(
                unescape_line(&line[..split]),
                unescape_line(&line[split + 1..]),
            ))
        })
        .collect()
}

/// Byte index of the first `=` not escaped by a backslash
fn separator_index(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Write a replace Dump, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_replace_dump<P: AsRef<Path>>(path: P, pairs: &[ReplacePair]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for pair in pairs {
        write_pair(&mut writer, pair)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append one pair to a replace Dump, creating it if needed
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn append_replace<P: AsRef<Path>>(path: P, pair: &ReplacePair) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_pair(&mut writer, pair)?;
    writer.flush()?;
    Ok(())
}

fn write_pair<W: Write>(writer: &mut W, pair: &ReplacePair) -> Result<()> {
    writeln!(
        writer,
        "{}={}",
        escape_line(&pair.from, true),
        escape_line(&pair.to, true)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_splits_on_first_separator() {
        let pairs = parse_replace_dump("...=…\na=b=c\nno separator\n");
        assert_eq!(
            pairs,
            vec![ReplacePair::new("...", "…"), ReplacePair::new("a", "b=c")]
        );
    }

    #[test]
    fn test_escaped_separator() {
        let pairs = parse_replace_dump(r"1+1\=2=two");
        assert_eq!(pairs, vec![ReplacePair::new("1+1=2", "two")]);
    }

    #[test]
    fn test_escaped_backslash_before_separator() {
        let pairs = parse_replace_dump(r"dir\\=folder");
        assert_eq!(pairs, vec![ReplacePair::new("dir\\", "folder")]);
    }

    #[test]
    fn test_write_append_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Replaces.lst");
        let pairs = vec![
            ReplacePair::new("a=b", "c"),
            ReplacePair::new("line\nbreak", "x\\y"),
        ];

        write_replace_dump(&path, &pairs[..1]).unwrap();
        append_replace(&path, &pairs[1]).unwrap();
        assert_eq!(read_replace_dump(&path).unwrap(), pairs);
    }
}
