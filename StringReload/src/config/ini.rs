//! Minimal INI reader
//!
//! Groups are `[Name]` lines, entries are `key=value`. Group and key names
//! compare case-insensitively; values are trimmed. Lines starting with `//`,
//! `;` or `!` are comments. The first matching entry wins.

use std::path::Path;

use super::ConfigSource;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct IniConfig {
    lines: Vec<String>,
}

impl IniConfig {
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Read an INI file
    ///
    /// # Errors
    /// Returns [`Error::ConfigNotFound`] if the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Every `(key, value)` of a group, keys lowercased
    #[must_use]
    pub fn entries(&self, group: &str) -> Vec<(String, String)> {
        let group = group.trim().to_lowercase();
        let mut current: Option<String> = None;
        let mut entries = Vec::new();

        for line in &self.lines {
            if line.starts_with("//") || line.starts_with(';') || line.starts_with('!') {
                continue;
            }
            let trimmed = line.trim();
            if let Some(name) = trimmed.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(name.trim().to_lowercase());
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if current.as_deref() == Some(group.as_str()) {
                entries.push((key.trim().to_lowercase(), value.trim().to_string()));
            }
        }
        entries
    }
}

impl ConfigSource for IniConfig {
    fn get(&self, key: &str, group: &str) -> Option<String> {
        let key = key.trim().to_lowercase();
        self.entries(group)
            .into_iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
; leading comment
[StringReloader]
MultiDB = true
// DumpFile=Ignored.lst
DumpFile=Main.lst
dumpfile=Second.lst

[Filter]
DenyList=@,<,>
";

    #[test]
    fn test_groups_and_case() {
        let ini = IniConfig::parse(SAMPLE);
        assert_eq!(ini.get("multidb", "stringreloader").as_deref(), Some("true"));
        assert_eq!(ini.get("DumpFile", "StringReloader").as_deref(), Some("Main.lst"));
        assert_eq!(ini.get("DenyList", "Filter").as_deref(), Some("@,<,>"));
        assert_eq!(ini.get("DenyList", "StringReloader"), None);
    }

    #[test]
    fn test_missing_file() {
        let err = IniConfig::load("/nonexistent/SRL.ini").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}
