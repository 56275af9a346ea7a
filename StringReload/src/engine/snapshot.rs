//! Immutable lookup state produced by loading a database

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use super::dialog::{DialogFilter, is_dialog};
use super::table::StringTable;
use super::text::{ReplaceList, TextRules};

/// Behavior switches read once at load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    pub dialog_check: bool,
    pub reload_mask_parameters: bool,
    pub decode_from_input: bool,
    pub cache_pointers: bool,
    pub no_reload: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            dialog_check: true,
            reload_mask_parameters: false,
            decode_from_input: false,
            cache_pointers: false,
            no_reload: false,
        }
    }
}

/// A successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The output with the raw input's affixes restored
    pub text: String,
    /// The normalized output, as remembered by the reply ring
    pub reply_key: String,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) options: EngineOptions,
    pub(crate) rules: TextRules,
    pub(crate) dialog: DialogFilter,
    /// encoded code → original char
    pub(crate) char_rld: HashMap<u16, char>,
    /// unknown code → literal char
    pub(crate) unk_rld: HashMap<u16, char>,
    pub(crate) replaces: ReplaceList,
    pub(crate) names: Vec<String>,
    pub(crate) table: StringTable,
}

impl Snapshot {
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn rules(&self) -> &TextRules {
        &self.rules
    }

    #[must_use]
    pub fn replaces(&self) -> &ReplaceList {
        &self.replaces
    }

    #[must_use]
    pub fn table(&self) -> &StringTable {
        &self.table
    }

    /// Database name by registration index
    #[must_use]
    pub fn database_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn database_names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        self.rules.normalize(raw)
    }

    #[must_use]
    pub fn is_dialog(&self, raw: &str) -> bool {
        is_dialog(raw, &self.rules, &self.dialog)
    }

    /// Map remapped characters back to their originals
    #[must_use]
    pub fn decode_input<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let remapped = |c: char| {
            u16::try_from(u32::from(c))
                .ok()
                .and_then(|code| self.char_rld.get(&code).copied())
        };
        if !text.chars().any(|c| remapped(c).is_some()) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.chars().map(|c| remapped(c).unwrap_or(c)).collect())
    }

    /// Exact match first, then masks in database order
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.table.get(key) {
            tracing::trace!("Exact match for {:?}", key);
            return Some(value.to_string());
        }

        let (mask, captures) = self.table.find_mask(key)?;
        tracing::trace!("Mask {:?} matched {:?}", mask.key(), key);
        if self.options.reload_mask_parameters {
            let reloaded: Vec<String> = captures
                .iter()
                .map(|capture| {
                    self.table
                        .get(&self.normalize(capture))
                        .map_or_else(|| (*capture).to_string(), ToString::to_string)
                })
                .collect();
            Some(mask.apply(&reloaded))
        } else {
            Some(mask.apply(&captures))
        }
    }

    /// Translate raw host text, or `None` when it is left alone
    #[must_use]
    pub fn translate(&self, raw: &str) -> Option<Translation> {
        let normalized = self.normalize(raw);
        self.translate_normalized(raw, &normalized)
    }

    pub(crate) fn translate_normalized(&self, raw: &str, normalized: &str) -> Option<Translation> {
        if normalized.chars().all(char::is_whitespace) {
            return None;
        }
        if self.options.dialog_check && !self.is_dialog(raw) {
            tracing::trace!("Not dialog: {:?}", raw);
            return None;
        }

        let key = if self.options.decode_from_input {
            self.decode_input(normalized)
        } else {
            Cow::Borrowed(normalized)
        };

        let output = self.replaces.apply(&self.lookup(&key)?);
        Some(Translation {
            reply_key: self.normalize(&output),
            text: self.rules.restore_affixes(raw, &output),
        })
    }

    /// Single-character path for hosts passing a character code
    #[must_use]
    pub fn remap_char(&self, code: u16) -> u16 {
        if let Some(&literal) = self.unk_rld.get(&code) {
            if let Ok(unit) = u16::try_from(u32::from(literal)) {
                return unit;
            }
        }

        let Some(c) = char::from_u32(u32::from(code)) else {
            return code;
        };
        let replaced = self.replaces.apply(c.encode_utf8(&mut [0u8; 4]));
        let mut chars = replaced.chars();
        match (chars.next(), chars.next()) {
            (Some(single), None) => u16::try_from(u32::from(single)).unwrap_or(code),
            _ => code,
        }
    }
}
