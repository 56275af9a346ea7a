//! Configuration
//!
//! Settings are read through [`ConfigSource`], a plain `get(key, group)`
//! lookup. INI files and TOML tables both implement it.

mod ini;
mod settings;

pub use ini::IniConfig;
pub use settings::{FILTER_GROUP, MAIN_GROUP, Settings};

/// A key/value configuration store grouped by section
pub trait ConfigSource {
    /// The raw value of `key` in `group`, if set
    fn get(&self, key: &str, group: &str) -> Option<String>;
}

impl ConfigSource for toml::Table {
    fn get(&self, key: &str, group: &str) -> Option<String> {
        let section = self
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(group))?
            .1
            .as_table()?;
        let value = section
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))?
            .1;
        Some(toml_value_string(value))
    }
}

fn toml_value_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| toml_value_string(item).replace(',', "\\,"))
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
