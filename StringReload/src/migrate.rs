//! Format migration: legacy databases back into Dumps

use crate::dump::WorkspaceLayout;
use crate::error::{Error, Result};
use crate::formats::FormatGeneration;
use crate::formats::legacy::LegacyData;

/// Migrate the workspace's database if it is a legacy generation.
///
/// The legacy file is decoded, its Dumps written, and the file deleted, so the
/// next compile produces SRL3. Returns the migrated generation, or `None` when
/// there is nothing to migrate.
///
/// # Errors
/// Returns [`Error::CorruptedData`](crate::Error::CorruptedData) for an
/// unrecognized signature and any decode or write error.
pub fn migrate_file(layout: &WorkspaceLayout) -> Result<Option<FormatGeneration>> {
    let path = layout.database_path();
    if !path.is_file() {
        return Ok(None);
    }

    let data = std::fs::read(&path)?;
    let generation = FormatGeneration::detect(&data)?;
    if !generation.needs_migration() {
        return Ok(None);
    }

    migrate_bytes(generation, &data, layout)?;
    std::fs::remove_file(&path)?;
    tracing::info!("Removed {}", path.display());
    Ok(Some(generation))
}

/// Decode legacy `data` and write its Dumps into `layout`
///
/// # Errors
/// Returns a corruption-class error if `data` does not decode, and any write
/// error.
pub fn migrate_bytes(
    generation: FormatGeneration,
    data: &[u8],
    layout: &WorkspaceLayout,
) -> Result<()> {
    match generation {
        FormatGeneration::Legacy => tracing::info!("TLBot Cache Detected... Rebuilding..."),
        other => tracing::info!("{} Database Detected... Rebuilding...", other),
    }

    let dumps = LegacyData::parse(generation, data)
        .map_err(|e| {
            if e.is_corruption() {
                e
            } else {
                Error::LoadTable {
                    table: generation.as_str(),
                    message: e.to_string(),
                }
            }
        })?
        .migrate();
    tracing::debug!(
        "Migrating {} translations, {} chars, {} replaces",
        dumps.translations.len(),
        dumps.chars.len() + dumps.unknown.len(),
        dumps.replaces.len()
    );
    dumps.write(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::read_translation_dump;
    use byteorder::{LittleEndian, WriteBytesExt};
    use tempfile::tempdir;

    fn tlbc(originals: &[&str], replacements: &[&str]) -> Vec<u8> {
        let mut data = b"TLBC".to_vec();
        for list in [originals, replacements] {
            data.write_u32::<LittleEndian>(list.len() as u32).unwrap();
            for value in list {
                data.extend_from_slice(value.as_bytes());
                data.push(0);
            }
        }
        data
    }

    #[test]
    fn test_tlbc_rewrites_aggregate_dump() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        std::fs::write(layout.dump_path(), "Stale\nEntry\n").unwrap();
        std::fs::write(layout.database_path(), tlbc(&["Hello"], &["Olá"])).unwrap();

        let migrated = migrate_file(&layout).unwrap();
        assert_eq!(migrated, Some(FormatGeneration::Legacy));
        assert!(!layout.database_path().exists());

        let entries = read_translation_dump(layout.dump_path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].replacement, "Olá");
    }

    #[test]
    fn test_nothing_to_migrate() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        assert_eq!(migrate_file(&layout).unwrap(), None);

        std::fs::write(layout.database_path(), b"SRL3\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();
        assert_eq!(migrate_file(&layout).unwrap(), None);
        assert!(layout.database_path().exists());
    }

    #[test]
    fn test_unknown_signature() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        std::fs::write(layout.database_path(), b"JUNKJUNK").unwrap();
        assert!(matches!(migrate_file(&layout), Err(Error::CorruptedData { .. })));
        assert!(layout.database_path().exists());
    }

    #[test]
    fn test_undecodable_legacy_is_corruption() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        let mut data = b"TLBC".to_vec();
        data.write_u32::<LittleEndian>(1).unwrap();
        data.extend_from_slice(&[0xFF, 0xFE, 0]);
        std::fs::write(layout.database_path(), data).unwrap();

        let err = migrate_file(&layout).unwrap_err();
        assert!(matches!(err, Error::LoadTable { table: "TLBot Cache", .. }), "{err:?}");
        assert!(err.is_corruption());
        assert!(layout.database_path().exists());
    }
}
