//! Runtime loading: SRL3 data into a [`Snapshot`]

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::config::Settings;
use crate::dump::ReplacePair;
use crate::engine::{CharRange, Mask, ReplaceList, Snapshot, TableBuilder};
use crate::formats::srl3::SrlData;

/// What a load produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub databases: usize,
    pub exact_entries: usize,
    pub mask_entries: usize,
    pub chars: usize,
    pub unknown: usize,
    pub replaces: usize,
}

/// Build the runtime tables of `data` under `settings`.
///
/// Exact keys are unique across every database: a key already loaded from an
/// earlier database is skipped. Mask keys are deduplicated by their raw form.
#[must_use]
pub fn load(data: SrlData, settings: &Settings) -> (Snapshot, LoadReport) {
    let mut rules = settings.text_rules();
    let mut replaces = ReplaceList::default();

    tracing::info!("Processing Char Reloads...");
    let mut char_rld = HashMap::new();
    for pair in &data.chars {
        let Ok(code) = u16::try_from(u32::from(pair.encoded)) else {
            tracing::warn!("Char remap {:?} is outside the BMP, skipped", pair.encoded);
            continue;
        };
        if let Entry::Vacant(slot) = char_rld.entry(code) {
            slot.insert(pair.original);
            let range = CharRange::single(u32::from(code));
            if !rules.ranges.contains(&range) {
                rules.ranges.push(range);
            }
            replaces.push(ReplacePair::new(
                pair.original.to_string(),
                pair.encoded.to_string(),
            ));
        }
    }

    let mut unk_rld = HashMap::new();
    for unk in &data.unknown {
        unk_rld.entry(unk.code).or_insert(unk.literal);
    }
    tracing::info!(
        "Chars Reloads Initialized, Total entries: {} + {}",
        unk_rld.len(),
        char_rld.len()
    );

    tracing::info!("Processing String Reloads...");
    let anti_mask = settings.anti_mask.as_str();
    let mut builder = TableBuilder::new(settings.multi_database);
    for database in &data.databases {
        for entry in &database.entries {
            let key = rules.normalize(&entry.original);
            if builder.contains_exact(&key) {
                continue;
            }

            let mut value = entry.replacement.as_str();
            if Mask::is_mask(&entry.original) {
                match value.strip_prefix(anti_mask).filter(|_| !anti_mask.is_empty()) {
                    // Anti-masked: plain exact entry without the prefix
                    Some(stripped) => value = stripped,
                    None => {
                        if settings.literal_mask_match {
                            builder.add_entry(key.clone(), replaces.apply(value));
                        }
                        builder.add_mask(&entry.original, Mask::new(key, replaces.apply(value)));
                        continue;
                    }
                }
            }
            builder.add_entry(key, replaces.apply(value));
        }
        builder.finish_database();
    }
    let table = builder.build();

    tracing::info!("Initializing Replaces...");
    replaces.extend(data.replaces);

    let names: Vec<String> = data.databases.into_iter().map(|db| db.name).collect();
    for (id, name) in names.iter().enumerate() {
        tracing::debug!("Database ID: {} Named As: {}", id, name);
    }

    let report = LoadReport {
        databases: names.len(),
        exact_entries: table.exact_len(),
        mask_entries: table.mask_len(),
        chars: char_rld.len(),
        unknown: unk_rld.len(),
        replaces: replaces.len(),
    };
    tracing::info!(
        "String Reloads Initialized, {} Databases, {} Reload Entries, {} Mask Entries",
        report.databases,
        report.exact_entries,
        report.mask_entries
    );

    let snapshot = Snapshot {
        options: settings.engine_options(),
        rules,
        dialog: settings.dialog_filter(),
        char_rld,
        unk_rld,
        replaces,
        names,
        table,
    };
    tracing::info!("Loading Complete.");
    (snapshot, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::{CharPair, TranslationEntry, UnknownChar};
    use crate::formats::srl3::SrlDatabase;
    use pretty_assertions::assert_eq;

    fn settings() -> Settings {
        Settings {
            dialog_check: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_first_database_wins() {
        let data = SrlData {
            databases: vec![
                SrlDatabase::new("first", vec![TranslationEntry::new("Hello", "Olá")]),
                SrlDatabase::new("second", vec![TranslationEntry::new(" Hello ", "Oi")]),
            ],
            ..SrlData::default()
        };
        let (snapshot, report) = load(data, &settings());
        assert_eq!(snapshot.lookup("Hello").as_deref(), Some("Olá"));
        assert_eq!(report.exact_entries, 1);
        assert_eq!(snapshot.database_name(1), Some("second"));
    }

    #[test]
    fn test_char_tables_first_wins() {
        let data = SrlData {
            chars: vec![
                CharPair { original: 'á', encoded: '¡' },
                CharPair { original: 'é', encoded: '¡' },
            ],
            unknown: vec![
                UnknownChar { code: 0x81, literal: '?' },
                UnknownChar { code: 0x81, literal: '!' },
            ],
            replaces: vec![ReplacePair::new("...", "…")],
            ..SrlData::default()
        };
        let (snapshot, report) = load(data, &settings());
        assert_eq!(report.chars, 1);
        assert_eq!(report.unknown, 1);
        assert_eq!(
            snapshot.replaces().pairs(),
            &[ReplacePair::new("á", "¡"), ReplacePair::new("...", "…")]
        );
        assert!(snapshot.rules().in_range('¡'));
    }

    #[test]
    fn test_entries_use_char_replaces_only() {
        let data = SrlData {
            databases: vec![SrlDatabase::new(
                "db",
                vec![TranslationEntry::new("Wait", "Espera...")],
            )],
            chars: vec![CharPair { original: 'E', encoded: 'Ɛ' }],
            replaces: vec![ReplacePair::new("...", "…")],
            ..SrlData::default()
        };
        let (snapshot, _) = load(data, &settings());
        assert_eq!(snapshot.table().get("Wait"), Some("Ɛspera..."));
    }

    #[test]
    fn test_masks() {
        let entries = vec![
            TranslationEntry::new("Go *!", "Vai *!"),
            TranslationEntry::new("Go *!", "Duplicate *!"),
            TranslationEntry::new("Take *", "::NOMASK::Pegar *"),
        ];
        let data = SrlData {
            databases: vec![SrlDatabase::new("db", entries)],
            ..SrlData::default()
        };

        let (snapshot, report) = load(data.clone(), &settings());
        assert_eq!(report.mask_entries, 1);
        assert_eq!(snapshot.lookup("Go home!").as_deref(), Some("Vai home!"));
        // literal registration is off
        assert_eq!(snapshot.table().get("Go *!"), None);
        assert_eq!(snapshot.lookup("Take *").as_deref(), Some("Pegar *"));
        assert_eq!(snapshot.lookup("Take it"), None);

        let literal = Settings {
            literal_mask_match: true,
            ..settings()
        };
        let (snapshot, _) = load(data, &literal);
        assert_eq!(snapshot.lookup("Go *!").as_deref(), Some("Vai *!"));
        assert_eq!(snapshot.lookup("Go home!").as_deref(), Some("Vai home!"));
    }

    #[test]
    fn test_anti_mask_with_literal_matching() {
        let data = SrlData {
            databases: vec![SrlDatabase::new(
                "db",
                vec![TranslationEntry::new("Take *", "::NOMASK::Pegar *")],
            )],
            ..SrlData::default()
        };
        let literal = Settings {
            literal_mask_match: true,
            ..settings()
        };
        let (snapshot, report) = load(data, &literal);
        assert_eq!(snapshot.table().get("Take *"), Some("Pegar *"));
        assert_eq!(snapshot.lookup("Take it"), None);
        assert_eq!(report.mask_entries, 0);
    }
}
