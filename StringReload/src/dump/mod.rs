//! Plain-text Dump files
//!
//! Dumps are the human-editable sources a database is compiled from:
//!
//! - translation Dumps: line pairs (original, replacement)
//! - the character-remap Dump: `X=Y` and `X=0xHHHH` lines
//! - the replace Dump: `from=to` lines
//!
//! A [`DumpSet`] is the in-memory form of a full set of Dumps. It is what a
//! legacy database migrates into before being recompiled.

mod charmap;
mod layout;
mod replace;
mod translation;

pub use charmap::{parse_char_dump, read_char_dump, write_char_dump};
pub use layout::{DEFAULT_DUMP_MASK, ID_PLACEHOLDER, WorkspaceLayout};
pub use replace::{append_replace, parse_replace_dump, read_replace_dump, write_replace_dump};
pub use translation::{
    append_translation, parse_translation_dump, read_translation_dump, write_translation_dump,
};

use crate::error::Result;
use serde::Serialize;

/// A single `(original, replacement)` translation pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub original: String,
    pub replacement: String,
}

impl TranslationEntry {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

/// A character remap: `original` is rendered by the target as `encoded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharPair {
    pub original: char,
    pub encoded: char,
}

/// A character code outside the printable set, shown as `literal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnknownChar {
    pub code: u16,
    pub literal: char,
}

/// A literal `from → to` post-processing replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacePair {
    pub from: String,
    pub to: String,
}

impl ReplacePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Where the translation pairs of a [`DumpSet`] go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationDumps {
    /// Everything in the aggregate Dump
    Aggregate(Vec<TranslationEntry>),
    /// One per-database Dump per `(id, entries)`, named through the Dump mask
    PerDatabase(Vec<(String, Vec<TranslationEntry>)>),
}

impl TranslationDumps {
    /// Total number of translation pairs
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Aggregate(entries) => entries.len(),
            Self::PerDatabase(databases) => databases.iter().map(|(_, e)| e.len()).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete set of Dumps held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSet {
    pub translations: TranslationDumps,
    pub chars: Vec<CharPair>,
    pub unknown: Vec<UnknownChar>,
    pub replaces: Vec<ReplacePair>,
}

impl DumpSet {
    /// Write the set into a workspace.
    ///
    /// The aggregate Dump is always removed first, and rewritten only when the
    /// set carries aggregate entries. The char-remap Dump is rewritten only
    /// when the set has chars for it. Replace pairs are appended to the
    /// replace Dump one by one; a pair that fails is skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if any Dump cannot be written.
    pub fn write(&self, layout: &WorkspaceLayout) -> Result<()> {
        let aggregate = layout.dump_path();
        if aggregate.exists() {
            std::fs::remove_file(&aggregate)?;
        }

        match &self.translations {
            TranslationDumps::Aggregate(entries) => {
                if !entries.is_empty() {
                    write_translation_dump(&aggregate, entries)?;
                }
            }
            TranslationDumps::PerDatabase(databases) => {
                for (id, entries) in databases {
                    tracing::info!("Dumping Database Id: {}", id);
                    write_translation_dump(layout.per_database_path(id), entries)?;
                }
            }
        }

        if !self.chars.is_empty() || !self.unknown.is_empty() {
            tracing::info!("Dumping Char Reloads...");
            write_char_dump(layout.chars_path(), &self.chars, &self.unknown)?;
        }

        if !self.replaces.is_empty() {
            tracing::info!("Dumping Replaces...");
            let path = layout.replaces_path();
            for pair in &self.replaces {
                if let Err(e) = append_replace(&path, pair) {
                    tracing::warn!("Failed to dump replace {:?}: {}", pair.from, e);
                }
            }
        }

        Ok(())
    }
}

/// Escape a value so it fits on one Dump line.
///
/// `replace_sep` additionally escapes `=`, for `from=to` lines.
pub(crate) fn escape_line(value: &str, replace_sep: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '=' if replace_sep => out.push_str("\\="),
            c => out.push(c),
        }
    }
    out
}

/// Undo [`escape_line`]. Unknown escapes are kept as written.
pub(crate) fn unescape_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('=') => out.push('='),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split file content into lines, dropping a UTF-8 BOM and `\r\n` endings
pub(crate) fn dump_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .strip_prefix('\u{FEFF}')
        .unwrap_or(content)
        .lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_roundtrip() {
        let text = "line one\nline two\\ with = sign\r";
        assert_eq!(unescape_line(&escape_line(text, false)), text);
        assert_eq!(unescape_line(&escape_line(text, true)), text);
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_line(r"C:\path\x"), r"C:\path\x");
        assert_eq!(unescape_line("tail\\"), "tail\\");
        assert_eq!(unescape_line(r"a\tb"), "a\tb");
    }

    #[test]
    fn test_dump_lines_strips_bom_and_crlf() {
        let lines: Vec<_> = dump_lines("\u{FEFF}a\r\nb\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_translation_dumps_len() {
        let dumps = TranslationDumps::PerDatabase(vec![
            ("0".into(), vec![TranslationEntry::new("a", "b")]),
            ("1".into(), vec![TranslationEntry::new("c", "d"), TranslationEntry::new("e", "f")]),
        ]);
        assert_eq!(dumps.len(), 3);
        assert!(TranslationDumps::Aggregate(Vec::new()).is_empty());
    }
}
