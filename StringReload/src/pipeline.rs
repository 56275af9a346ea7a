//! Initialization pipeline
//!
//! Brings a workspace's database to the current generation and loads it:
//!
//! - no database: compile the Dumps
//! - legacy database: migrate it into Dumps (deleting it), then compile
//! - SRL3: load
//!
//! Each step strictly moves towards SRL3, so a handful of passes always
//! suffices. More than that means something outside keeps replacing the file.

use crate::compiler::compile;
use crate::config::Settings;
use crate::dump::WorkspaceLayout;
use crate::engine::Snapshot;
use crate::error::{Error, Result};
use crate::formats::FormatGeneration;
use crate::formats::srl3::parse_srl3_bytes;
use crate::loader::{LoadReport, load};
use crate::migrate::migrate_bytes;

/// Upper bound on detect/migrate/compile passes
pub const MAX_PASSES: usize = 4;

/// Migrate, compile and load the workspace's database
///
/// # Errors
/// Returns [`Error::CorruptedData`] or [`Error::UnsupportedVersion`] for an
/// unusable database, [`Error::ReloadDidNotConverge`] if the database never
/// settles, and any migration, compile or load error.
pub fn initialize(layout: &WorkspaceLayout, settings: &Settings) -> Result<(Snapshot, LoadReport)> {
    let path = layout.database_path();

    for pass in 1..=MAX_PASSES {
        tracing::debug!("Initialization pass {}", pass);

        if !path.is_file() {
            tracing::info!("Database not found, compiling from Dumps...");
            compile(layout)?;
            continue;
        }

        let data = std::fs::read(&path)?;
        match FormatGeneration::detect(&data)? {
            FormatGeneration::Gen3 => {
                let parsed = parse_srl3_bytes(&data)?;
                return Ok(load(parsed, settings));
            }
            legacy => {
                migrate_bytes(legacy, &data, layout)?;
                std::fs::remove_file(&path)?;
                tracing::info!("Restarting...");
            }
        }
    }

    Err(Error::ReloadDidNotConverge {
        attempts: MAX_PASSES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_compiles_missing_database() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Strings.lst"), "Hello\nOlá\n").unwrap();
        let layout = WorkspaceLayout::new(dir.path());

        let (snapshot, report) = initialize(&layout, &Settings::default()).unwrap();
        assert_eq!(report.exact_entries, 1);
        assert_eq!(snapshot.lookup("Hello").as_deref(), Some("Olá"));
        assert!(layout.database_path().is_file());
    }

    #[test]
    fn test_bad_version_is_fatal() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        std::fs::write(layout.database_path(), b"SRL3\x01\x00").unwrap();

        let err = initialize(&layout, &Settings::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { version: 1 }));
        assert!(err.is_corruption());
    }
}
