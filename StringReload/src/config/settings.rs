//! Engine settings and their configuration keys

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConfigSource, IniConfig};
use crate::dump::{DEFAULT_DUMP_MASK, WorkspaceLayout};
use crate::engine::{
    CharRange, DEFAULT_DENY_LIST, DialogFilter, EngineOptions, TextRules,
};
use crate::error::{Error, Result};

/// Group holding most keys
pub const MAIN_GROUP: &str = "StringReloader";

/// Group holding the dialog filter and trim lists
pub const FILTER_GROUP: &str = "Filter";

const DEFAULT_TRIM_LIST: [&str; 5] = [" ", "\t", "\r", "\n", "\u{3000}"];
const DEFAULT_ANTI_MASK: &str = "::NOMASK::";
const DEFAULT_FATAL_PAUSE_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    // Workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    pub database_file: String,
    pub dump_file: String,
    pub dump_mask: String,
    pub chars_file: String,
    pub replaces_file: String,

    // Matching
    pub trim_list: Vec<String>,
    pub trim_range_mismatch: bool,
    pub literal_mask_match: bool,
    pub multi_database: bool,
    pub acceptable_ranges: Vec<CharRange>,
    pub anti_mask: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_line: Option<String>,
    pub match_delete: Vec<String>,
    pub reload_mask_parameters: bool,
    pub decode_from_input: bool,

    // Dialog filter
    pub dialog_check: bool,
    pub deny_list: Vec<String>,

    // Host
    pub cache_pointers: bool,
    pub no_reload: bool,
    pub fatal_pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let layout = WorkspaceLayout::new("");
        Self {
            working_dir: None,
            database_file: layout.database,
            dump_file: layout.dump,
            dump_mask: DEFAULT_DUMP_MASK.to_string(),
            chars_file: layout.chars,
            replaces_file: layout.replaces,
            trim_list: DEFAULT_TRIM_LIST.iter().map(ToString::to_string).collect(),
            trim_range_mismatch: false,
            literal_mask_match: false,
            multi_database: false,
            acceptable_ranges: Vec::new(),
            anti_mask: DEFAULT_ANTI_MASK.to_string(),
            break_line: None,
            match_delete: Vec::new(),
            reload_mask_parameters: false,
            decode_from_input: false,
            dialog_check: true,
            deny_list: DEFAULT_DENY_LIST.iter().map(ToString::to_string).collect(),
            cache_pointers: false,
            no_reload: false,
            fatal_pause_ms: DEFAULT_FATAL_PAUSE_MS,
        }
    }
}

/// First value found under any `;`-separated alias
fn lookup(source: &dyn ConfigSource, aliases: &str, group: &str) -> Option<String> {
    aliases
        .split(';')
        .filter(|alias| !alias.is_empty())
        .find_map(|alias| source.get(alias, group))
}

pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key}: '{other}' is not a boolean"))),
    }
}

/// Undo `\,` `\s` `\n` `\r` `\t` `\\` escapes
pub(crate) fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(',') => out.push(','),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split a comma separated list on unescaped commas, then unescape items
pub(crate) fn parse_list(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            items.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push('\\');
    }
    items.push(current);

    items
        .iter()
        .map(|item| unescape_value(item))
        .filter(|item| !item.is_empty())
        .collect()
}

pub(crate) fn parse_ranges(value: &str) -> Result<Vec<CharRange>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}

impl Settings {
    /// Read every known key from `source`, keeping defaults for absent ones
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a value that does not parse.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let mut settings = Self::default();
        let main = |aliases: &str| lookup(source, aliases, MAIN_GROUP);
        let flag = |aliases: &str, target: &mut bool| -> Result<()> {
            if let Some(value) = main(aliases) {
                *target = parse_bool(aliases, &value)?;
            }
            Ok(())
        };

        if let Some(dir) = main("WorkingDir;WorkDir;DataDir;Workspace").filter(|d| !d.is_empty()) {
            settings.working_dir = Some(PathBuf::from(dir));
        }
        for (aliases, target) in [
            ("DatabaseFile", &mut settings.database_file),
            ("DumpFile", &mut settings.dump_file),
            ("DumpMask", &mut settings.dump_mask),
            ("CharsFile", &mut settings.chars_file),
            ("ReplacesFile", &mut settings.replaces_file),
        ] {
            if let Some(value) = main(aliases).filter(|v| !v.is_empty()) {
                *target = value;
            }
        }

        flag("TrimRangeMismatch;TrimRange", &mut settings.trim_range_mismatch)?;
        flag("LiteralMask;MaskLiteralMatch;MaskMatch", &mut settings.literal_mask_match)?;
        flag("MultiDatabase;MultiDB;SplitDatabase;SplitDB", &mut settings.multi_database)?;
        flag("ReloadMaskArgs;ReloadMaskParameters", &mut settings.reload_mask_parameters)?;
        flag(
            "DecodeFromInput;DecodeInputRemap;DecodeCharacterRemapFromInput;DecodeRemapChars",
            &mut settings.decode_from_input,
        )?;
        flag("CachePointers;CachePointer;ReusePointer;ReusePointers", &mut settings.cache_pointers)?;
        flag("ReadOnly;NoInjection;DisableReloader;NoReload", &mut settings.no_reload)?;

        let mut no_dialog_check = false;
        flag(
            "NoDialogCheck;NoDiagCheck;DisableDiagCheck;DisableDialogCheck",
            &mut no_dialog_check,
        )?;
        settings.dialog_check = !no_dialog_check;

        if let Some(value) = main("AcceptableRanges;AcceptableRange;ValidRange;ValidRanges") {
            settings.acceptable_ranges = parse_ranges(&value)?;
        }
        if let Some(value) = main("AntiMask;AntiMaskParser") {
            settings.anti_mask = unescape_value(&value);
        }
        if let Some(value) = main("BreakLine;GameBreakLine").filter(|v| !v.is_empty()) {
            settings.break_line = Some(unescape_value(&value));
        }
        if let Some(value) = main("MatchDel;MatchDelete") {
            settings.match_delete = parse_list(&value);
        }
        if let Some(value) = main("FatalPause") {
            settings.fatal_pause_ms = value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("FatalPause: '{value}' is not a number")))?;
        }

        if let Some(value) = lookup(source, "TrimList", FILTER_GROUP) {
            settings.trim_list = parse_list(&value);
        }
        if let Some(value) = lookup(source, "DenyList", FILTER_GROUP) {
            settings.deny_list = parse_list(&value);
        }

        Ok(settings)
    }

    /// Load settings from a `.toml` or INI file, chosen by extension
    ///
    /// # Errors
    /// Returns [`Error::ConfigNotFound`] for a missing file and any parse error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            let table: toml::Table = std::fs::read_to_string(path)?.parse()?;
            Self::from_source(&table)
        } else {
            Self::from_source(&IniConfig::load(path)?)
        }
    }

    /// The workspace these settings describe, under `base`
    #[must_use]
    pub fn layout(&self, base: &Path) -> WorkspaceLayout {
        let root = match &self.working_dir {
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        };
        let mut layout = WorkspaceLayout::new(root);
        layout.database.clone_from(&self.database_file);
        layout.dump.clone_from(&self.dump_file);
        layout.dump_mask.clone_from(&self.dump_mask);
        layout.chars.clone_from(&self.chars_file);
        layout.replaces.clone_from(&self.replaces_file);
        layout
    }

    #[must_use]
    pub fn text_rules(&self) -> TextRules {
        TextRules {
            trim_list: self.trim_list.clone(),
            ranges: self.acceptable_ranges.clone(),
            trim_range_mismatch: self.trim_range_mismatch,
            break_line: self.break_line.clone(),
            match_delete: self.match_delete.clone(),
        }
    }

    #[must_use]
    pub fn dialog_filter(&self) -> DialogFilter {
        DialogFilter {
            deny_list: self.deny_list.clone(),
        }
    }

    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            dialog_check: self.dialog_check,
            reload_mask_parameters: self.reload_mask_parameters,
            decode_from_input: self.decode_from_input,
            cache_pointers: self.cache_pointers,
            no_reload: self.no_reload,
        }
    }
}
