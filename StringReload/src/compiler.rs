//! Database compiler: Dumps into an SRL3 file

use std::path::PathBuf;

use serde::Serialize;

use crate::dump::{WorkspaceLayout, read_char_dump, read_replace_dump, read_translation_dump};
use crate::error::Result;
use crate::formats::srl3::{SrlData, SrlDatabase, write_srl3};

/// What a compile produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    pub path: PathBuf,
    /// `(name, entry count)` per database, in registration order
    pub databases: Vec<(String, usize)>,
    pub chars: usize,
    pub unknown: usize,
    pub replaces: usize,
    /// Replacements containing an encoded character
    pub violations: Vec<String>,
}

impl CompileReport {
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.databases.iter().map(|(_, count)| count).sum()
    }
}

/// Read every Dump of a workspace into SRL3 data.
///
/// Per-database Dumps come first, ordered by file name, then the aggregate
/// Dump. Missing files are simply absent features.
///
/// # Errors
/// Returns an error if a Dump exists but cannot be read.
pub fn assemble(layout: &WorkspaceLayout) -> Result<(SrlData, Vec<String>)> {
    let mut data = SrlData::default();

    let chars_path = layout.chars_path();
    if chars_path.is_file() {
        tracing::info!("Compiling Char Reloads...");
        let (chars, unknown) = read_char_dump(&chars_path)?;
        data.chars = chars;
        data.unknown = unknown;
    }

    tracing::info!("Generating String Reload Database...");
    for (id, path) in layout.discover_per_database()? {
        tracing::debug!("Reading Database {} from {}", id, path.display());
        let entries = read_translation_dump(&path)?;
        data.databases.push(SrlDatabase::new(id, entries));
    }

    let aggregate = layout.dump_path();
    if aggregate.is_file() {
        let entries = read_translation_dump(&aggregate)?;
        data.databases
            .push(SrlDatabase::new(layout.aggregate_name(), entries));
    }
    tracing::info!("{} Databases Generated.", data.databases.len());

    let encoded: Vec<char> = data.chars.iter().map(|pair| pair.encoded).collect();
    let violations = find_violations(&data.databases, &encoded);

    let replaces_path = layout.replaces_path();
    if replaces_path.is_file() {
        data.replaces = read_replace_dump(&replaces_path)?;
    }

    Ok((data, violations))
}

/// Replacements that already contain an encoded character.
///
/// The remap would make them ambiguous at runtime. Reported once per string.
#[must_use]
pub fn find_violations(databases: &[SrlDatabase], encoded: &[char]) -> Vec<String> {
    if encoded.is_empty() {
        return Vec::new();
    }

    let mut violations = Vec::new();
    for database in databases {
        for entry in &database.entries {
            if entry.replacement.chars().any(|c| encoded.contains(&c)) {
                tracing::warn!("Remap Violation: {}", entry.replacement);
                violations.push(entry.replacement.clone());
            }
        }
    }
    violations
}

/// Compile a workspace's Dumps into its database file.
///
/// The previous database is only replaced once the new one is fully written.
///
/// # Errors
/// Returns an error if a Dump cannot be read or the database cannot be written.
pub fn compile(layout: &WorkspaceLayout) -> Result<CompileReport> {
    let (data, violations) = assemble(layout)?;
    let path = layout.database_path();
    write_srl3(&path, &data)?;
    tracing::info!("Database Built Successfully: {}", path.display());

    Ok(CompileReport {
        path,
        databases: data
            .databases
            .iter()
            .map(|db| (db.name.clone(), db.entries.len()))
            .collect(),
        chars: data.chars.len(),
        unknown: data.unknown.len(),
        replaces: data.replaces.len(),
        violations,
    })
}
