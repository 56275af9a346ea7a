//! CLI command for inspecting database files

use std::path::Path;

use serde::Serialize;

use crate::cli::Workspace;
use crate::dump::{DumpSet, TranslationDumps, TranslationEntry};
use crate::formats::FormatGeneration;
use crate::formats::legacy::LegacyData;
use crate::formats::srl3::parse_srl3_bytes;

#[derive(Serialize)]
struct DatabaseSummary<'a> {
    name: String,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [TranslationEntry]>,
}

#[derive(Serialize)]
struct Summary<'a> {
    generation: &'static str,
    databases: Vec<DatabaseSummary<'a>>,
    chars: usize,
    unknown: usize,
    replaces: usize,
}

/// Databases as `(name, entries)`, whatever the generation
fn named_databases(dumps: &DumpSet, aggregate_name: String) -> Vec<(String, &[TranslationEntry])> {
    match &dumps.translations {
        TranslationDumps::Aggregate(entries) => vec![(aggregate_name, entries.as_slice())],
        TranslationDumps::PerDatabase(databases) => databases
            .iter()
            .map(|(id, entries)| (id.clone(), entries.as_slice()))
            .collect(),
    }
}

pub fn execute(
    workspace: &Workspace,
    source: Option<&Path>,
    entries: bool,
    json: bool,
) -> anyhow::Result<()> {
    let path = source.map_or_else(|| workspace.layout.database_path(), Path::to_path_buf);
    let data = std::fs::read(&path)?;
    let generation = FormatGeneration::detect(&data)?;

    // Both shapes are viewed through a DumpSet so they print alike
    let dumps = if generation == FormatGeneration::Gen3 {
        let srl = parse_srl3_bytes(&data)?;
        DumpSet {
            translations: TranslationDumps::PerDatabase(
                srl.databases.into_iter().map(|db| (db.name, db.entries)).collect(),
            ),
            chars: srl.chars,
            unknown: srl.unknown,
            replaces: srl.replaces,
        }
    } else {
        LegacyData::parse(generation, &data)?.migrate()
    };

    let databases = named_databases(&dumps, workspace.layout.aggregate_name());
    let summary = Summary {
        generation: generation.as_str(),
        databases: databases
            .iter()
            .map(|(name, items)| DatabaseSummary {
                name: name.clone(),
                entries: items.len(),
                items: entries.then_some(*items),
            })
            .collect(),
        chars: dumps.chars.len(),
        unknown: dumps.unknown.len(),
        replaces: dumps.replaces.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} ({})", path.display(), summary.generation);
    if generation.needs_migration() {
        println!("  legacy database, run `srl migrate` to convert it");
    }
    for db in &summary.databases {
        println!("  {}: {} entries", db.name, db.entries);
        for item in db.items.unwrap_or_default() {
            println!("    {:?} -> {:?}", item.original, item.replacement);
        }
    }
    println!(
        "  {} chars, {} unknown chars, {} replaces",
        summary.chars, summary.unknown, summary.replaces
    );
    Ok(())
}
