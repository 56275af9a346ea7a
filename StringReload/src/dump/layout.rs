//! File names of a StringReload workspace

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Placeholder in the per-database Dump mask replaced by the database id
pub const ID_PLACEHOLDER: &str = "{id}";

/// Default per-database Dump mask
pub const DEFAULT_DUMP_MASK: &str = "Strings.{id}.lst";

/// Every file a workspace reads or writes, relative to one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
    pub database: String,
    pub dump: String,
    pub dump_mask: String,
    pub chars: String,
    pub replaces: String,
}

impl WorkspaceLayout {
    /// Layout with the default file names under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            database: "Strings.srl".to_string(),
            dump: "Strings.lst".to_string(),
            dump_mask: DEFAULT_DUMP_MASK.to_string(),
            chars: "Chars.lst".to_string(),
            replaces: "Replaces.lst".to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The compiled binary database
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.root.join(&self.database)
    }

    /// The aggregate translation Dump
    #[must_use]
    pub fn dump_path(&self) -> PathBuf {
        self.root.join(&self.dump)
    }

    /// Name of the aggregate database: the aggregate Dump's file stem
    #[must_use]
    pub fn aggregate_name(&self) -> String {
        Path::new(&self.dump)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.dump.clone())
    }

    /// The per-database Dump for database `id`
    #[must_use]
    pub fn per_database_path(&self, id: &str) -> PathBuf {
        self.root.join(self.dump_mask.replace(ID_PLACEHOLDER, id))
    }

    /// The character-remap Dump
    #[must_use]
    pub fn chars_path(&self) -> PathBuf {
        self.root.join(&self.chars)
    }

    /// The replace Dump
    #[must_use]
    pub fn replaces_path(&self) -> PathBuf {
        self.root.join(&self.replaces)
    }

    /// Extract the database id from a file name matching the Dump mask
    #[must_use]
    pub fn match_dump_mask<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let (prefix, suffix) = self
            .dump_mask
            .split_once(ID_PLACEHOLDER)
            .unwrap_or((self.dump_mask.as_str(), ""));
        if file_name.len() <= prefix.len() + suffix.len() {
            return None;
        }
        file_name.strip_prefix(prefix)?.strip_suffix(suffix)
    }

    /// Find every per-database Dump, as `(id, path)`, ordered by file name
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be read.
    pub fn discover_per_database(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if let Some(id) = self.match_dump_mask(&name) {
                found.push((id.to_string(), entry.path().to_path_buf()));
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_match_dump_mask() {
        let layout = WorkspaceLayout::new("data");
        assert_eq!(layout.match_dump_mask("Strings.menu.lst"), Some("menu"));
        assert_eq!(layout.match_dump_mask("Strings.0.lst"), Some("0"));
        assert_eq!(layout.match_dump_mask("Strings.lst"), None);
        assert_eq!(layout.match_dump_mask("Chars.lst"), None);
    }

    #[test]
    fn test_per_database_path() {
        let layout = WorkspaceLayout::new("data");
        assert_eq!(
            layout.per_database_path("3"),
            PathBuf::from("data").join("Strings.3.lst")
        );
        assert_eq!(layout.aggregate_name(), "Strings");
    }

    #[test]
    fn test_discover_sorted_by_name() {
        let dir = tempdir().unwrap();
        for name in ["Strings.b.lst", "Strings.a.lst", "Strings.lst", "Other.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("Strings.dir.lst")).unwrap();

        let layout = WorkspaceLayout::new(dir.path());
        let ids: Vec<_> = layout
            .discover_per_database()
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_discover_missing_root() {
        let layout = WorkspaceLayout::new("/nonexistent/stringreload/data");
        assert!(layout.discover_per_database().unwrap().is_empty());
    }
}
