//! Runtime string tables

use std::collections::HashSet;

use indexmap::IndexMap;

use super::mask::Mask;

/// Masks of one runtime database, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MaskDatabase {
    pub masks: Vec<Mask>,
    pub exact_entries: usize,
}

/// Exact entries are unique across every database, so they share one map.
/// Masks stay grouped per database, consulted in registration order.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    exact: IndexMap<String, String>,
    databases: Vec<MaskDatabase>,
}

impl StringTable {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.exact.get(key).map(String::as_str)
    }

    /// First mask, across databases in order, that matches `input`
    pub fn find_mask<'a, 'b>(&'a self, input: &'b str) -> Option<(&'a Mask, Vec<&'b str>)> {
        self.databases
            .iter()
            .flat_map(|db| db.masks.iter())
            .find_map(|mask| mask.captures(input).map(|caps| (mask, caps)))
    }

    #[must_use]
    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    #[must_use]
    pub fn mask_len(&self) -> usize {
        self.databases.iter().map(|db| db.masks.len()).sum()
    }

    #[must_use]
    pub fn databases(&self) -> &[MaskDatabase] {
        &self.databases
    }

    pub fn exact_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exact.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Incremental construction of a [`StringTable`]
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: StringTable,
    current: MaskDatabase,
    mask_keys: HashSet<String>,
    split: bool,
}

impl TableBuilder {
    /// With `split` off every source database lands in one runtime database
    #[must_use]
    pub fn new(split: bool) -> Self {
        Self {
            split,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn contains_exact(&self, key: &str) -> bool {
        self.table.exact.contains_key(key)
    }

    /// Register an exact entry. An existing key keeps its first value.
    pub fn add_entry(&mut self, key: String, value: String) -> bool {
        if self.contains_exact(&key) {
            return false;
        }
        self.table.exact.insert(key, value);
        self.current.exact_entries += 1;
        true
    }

    /// Register a mask unless its raw key was already seen
    pub fn add_mask(&mut self, raw_key: &str, mask: Mask) -> bool {
        if !self.mask_keys.insert(raw_key.to_string()) {
            tracing::debug!("Duplicate mask ignored: {:?}", raw_key);
            return false;
        }
        self.current.masks.push(mask);
        true
    }

    /// Close the current source database
    pub fn finish_database(&mut self) {
        if self.split {
            let finished = std::mem::take(&mut self.current);
            self.table.databases.push(finished);
        }
    }

    #[must_use]
    pub fn build(mut self) -> StringTable {
        if !self.split || self.table.databases.is_empty() {
            self.table.databases.push(self.current);
        }
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_exact_wins() {
        let mut builder = TableBuilder::new(true);
        assert!(builder.add_entry("Hello".into(), "Olá".into()));
        builder.finish_database();
        assert!(!builder.add_entry("Hello".into(), "Oi".into()));
        builder.finish_database();

        let table = builder.build();
        assert_eq!(table.get("Hello"), Some("Olá"));
        assert_eq!(table.databases().len(), 2);
        assert_eq!(table.databases()[1].exact_entries, 0);
    }

    #[test]
    fn test_masks_in_database_order() {
        let mut builder = TableBuilder::new(true);
        builder.add_mask("* apples", Mask::new("* apples", "* maçãs"));
        builder.finish_database();
        builder.add_mask("Two *", Mask::new("Two *", "Duas *"));
        assert!(!builder.add_mask("* apples", Mask::new("* apples", "ignored")));
        builder.finish_database();

        let table = builder.build();
        let (mask, caps) = table.find_mask("Two apples").unwrap();
        assert_eq!(mask.value(), "* maçãs");
        assert_eq!(caps, vec!["Two"]);
        assert_eq!(table.mask_len(), 2);
    }

    #[test]
    fn test_unsplit_shares_one_database() {
        let mut builder = TableBuilder::new(false);
        builder.add_entry("a".into(), "b".into());
        builder.finish_database();
        builder.add_entry("c".into(), "d".into());
        builder.finish_database();

        let table = builder.build();
        assert_eq!(table.databases().len(), 1);
        assert_eq!(table.exact_len(), 2);
    }
}
