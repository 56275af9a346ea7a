//! Text rules: normalization, affix trimming and the replace pass

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::dump::ReplacePair;
use crate::error::{Error, Result};

/// Inclusive range of UTF-16 code units considered legitimate text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub min: u32,
    pub max: u32,
}

impl CharRange {
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn single(code: u32) -> Self {
        Self::new(code, code)
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        (self.min..=self.max).contains(&u32::from(c))
    }
}

impl FromStr for CharRange {
    type Err = Error;

    /// `min-max` or a single code, hex with or without `0x`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (min, max) = s.split_once('-').unwrap_or((s, s));
        let parse = |v: &str| {
            let v = v.trim();
            let digits = v
                .strip_prefix("0x")
                .or_else(|| v.strip_prefix("0X"))
                .unwrap_or(v);
            u32::from_str_radix(digits, 16)
                .map_err(|_| Error::Config(format!("invalid character code '{v}' in range '{s}'")))
        };
        let (min, max) = (parse(min)?, parse(max)?);
        if min > max {
            return Err(Error::Config(format!("range '{s}' has min above max")));
        }
        Ok(Self::new(min, max))
    }
}

impl Serialize for CharRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}-0x{:04X}", self.min, self.max)
    }
}

/// How raw text is minified before matching
#[derive(Debug, Clone, Default)]
pub struct TextRules {
    pub trim_list: Vec<String>,
    pub ranges: Vec<CharRange>,
    pub trim_range_mismatch: bool,
    pub break_line: Option<String>,
    pub match_delete: Vec<String>,
}

impl TextRules {
    #[must_use]
    pub fn in_range(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }

    fn trims_ranges(&self) -> bool {
        self.trim_range_mismatch && !self.ranges.is_empty()
    }

    /// Replace the host's line-break marker with `\n`
    #[must_use]
    pub fn fold_line_break(&self, text: &str) -> String {
        match &self.break_line {
            Some(marker) if !marker.is_empty() => text.replace(marker.as_str(), "\n"),
            _ => text.to_string(),
        }
    }

    /// Strip leading affixes until none matches
    #[must_use]
    pub fn trim_start<'a>(&self, text: &'a str) -> &'a str {
        let mut rest = text;
        loop {
            let before = rest.len();
            for affix in self.trim_list.iter().filter(|a| !a.is_empty()) {
                while let Some(stripped) = rest.strip_prefix(affix.as_str()) {
                    rest = stripped;
                }
            }
            if self.trims_ranges() {
                while let Some(c) = rest.chars().next().filter(|&c| !self.in_range(c)) {
                    rest = &rest[c.len_utf8()..];
                }
            }
            if rest.len() == before {
                return rest;
            }
        }
    }

    /// Strip trailing affixes until none matches
    #[must_use]
    pub fn trim_end<'a>(&self, text: &'a str) -> &'a str {
        let mut rest = text;
        loop {
            let before = rest.len();
            for affix in self.trim_list.iter().filter(|a| !a.is_empty()) {
                while let Some(stripped) = rest.strip_suffix(affix.as_str()) {
                    rest = stripped;
                }
            }
            if self.trims_ranges() {
                while let Some(c) = rest.chars().next_back().filter(|&c| !self.in_range(c)) {
                    rest = &rest[..rest.len() - c.len_utf8()];
                }
            }
            if rest.len() == before {
                return rest;
            }
        }
    }

    #[must_use]
    pub fn trim<'a>(&self, text: &'a str) -> &'a str {
        self.trim_end(self.trim_start(text))
    }

    /// Minify text into its lookup key
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let folded = self.fold_line_break(raw);
        let mut output = self.trim(&folded).to_string();
        for token in self.match_delete.iter().filter(|t| !t.is_empty()) {
            output = output.replace(token.as_str(), "");
        }
        output
    }

    /// Trim `output`, then put back exactly what trimming removed from `raw`
    #[must_use]
    pub fn restore_affixes(&self, raw: &str, output: &str) -> String {
        let prefix_len = raw.len() - self.trim_start(raw).len();
        let suffix_start = self.trim_end(raw).len();
        let prefix = &raw[..prefix_len];
        // A raw string that is all affix would otherwise be restored twice
        let suffix = if suffix_start < prefix_len {
            ""
        } else {
            &raw[suffix_start..]
        };
        format!("{prefix}{}{suffix}", self.trim(output))
    }
}

/// Ordered literal replacements, applied first to last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceList {
    pairs: Vec<ReplacePair>,
}

impl ReplaceList {
    pub fn push(&mut self, pair: ReplacePair) {
        self.pairs.push(pair);
    }

    pub fn extend(&mut self, pairs: impl IntoIterator<Item = ReplacePair>) {
        self.pairs.extend(pairs);
    }

    #[must_use]
    pub fn pairs(&self) -> &[ReplacePair] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut output = text.to_string();
        for pair in self.pairs.iter().filter(|p| !p.from.is_empty()) {
            if output.contains(pair.from.as_str()) {
                output = output.replace(pair.from.as_str(), &pair.to);
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rules(trim: &[&str]) -> TextRules {
        TextRules {
            trim_list: trim.iter().map(ToString::to_string).collect(),
            ..TextRules::default()
        }
    }

    #[test]
    fn test_trim_repeats_until_stable() {
        let rules = rules(&[" ", "\t", "-"]);
        assert_eq!(rules.trim(" -\t- Hi there -\t "), "Hi there");
    }

    #[test]
    fn test_trim_multi_char_affix() {
        let rules = rules(&["  "]);
        // a lone space is not the affix
        assert_eq!(rules.trim("   Hi   "), " Hi ");
    }

    #[test]
    fn test_trim_out_of_range_chars() {
        let mut rules = rules(&[" "]);
        rules.ranges = vec![CharRange::new(0x20, 0x7E)];
        rules.trim_range_mismatch = true;
        assert_eq!(rules.trim("「 Hello 」"), "Hello");

        rules.trim_range_mismatch = false;
        assert_eq!(rules.trim("「 Hello 」"), "「 Hello 」");
    }

    #[test]
    fn test_normalize() {
        let rules = TextRules {
            trim_list: vec![" ".into()],
            break_line: Some("\\n".into()),
            match_delete: vec!["#".into()],
            ..TextRules::default()
        };
        assert_eq!(rules.normalize("  Line#1\\nLine 2 "), "Line1\nLine 2");
    }

    #[test]
    fn test_restore_affixes() {
        let rules = rules(&["  "]);
        assert_eq!(rules.restore_affixes("  Hi there  ", "Olá  "), "  Olá  ");
        assert_eq!(rules.restore_affixes("Hi", "Olá"), "Olá");
        assert_eq!(rules.restore_affixes("    ", "x"), "    x");
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("0x20-0x7E".parse::<CharRange>().unwrap(), CharRange::new(0x20, 0x7E));
        assert_eq!("3000-30FF".parse::<CharRange>().unwrap(), CharRange::new(0x3000, 0x30FF));
        assert_eq!("41".parse::<CharRange>().unwrap(), CharRange::single(0x41));
        assert!("7E-20".parse::<CharRange>().is_err());
        assert!("zz".parse::<CharRange>().is_err());
    }

    #[test]
    fn test_replace_list_in_order() {
        let mut list = ReplaceList::default();
        list.push(ReplacePair::new("a", "b"));
        list.push(ReplacePair::new("b", "c"));
        list.push(ReplacePair::new("", "never"));
        assert_eq!(list.apply("aab"), "ccc");
    }
}
