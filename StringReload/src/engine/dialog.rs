//! Heuristic deciding whether intercepted text looks like dialog

use super::text::TextRules;

/// Tokens whose presence marks text as markup or code, not dialog
pub const DEFAULT_DENY_LIST: [&str; 7] = ["@", "§", "$", "_", "<", ">", "/"];

#[derive(Debug, Clone)]
pub struct DialogFilter {
    pub deny_list: Vec<String>,
}

impl Default for DialogFilter {
    fn default() -> Self {
        Self {
            deny_list: DEFAULT_DENY_LIST.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Whether `raw` is worth translating.
///
/// Runs the gates on the trimmed text first. If that fails, runs every gate
/// once more on the normalized text.
#[must_use]
pub fn is_dialog(raw: &str, rules: &TextRules, filter: &DialogFilter) -> bool {
    let text = rules.fold_line_break(rules.trim(raw));
    if passes(&text, rules, filter) {
        return true;
    }
    let normalized = rules.normalize(raw);
    normalized != text && passes(&normalized, rules, filter)
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

fn passes(text: &str, rules: &TextRules, filter: &DialogFilter) -> bool {
    if is_blank(text) || is_blank(rules.trim(text).trim_matches(['.', '?', '!'])) {
        return false;
    }

    let minified = rules.normalize(text);
    let minified_len = minified.chars().count();
    let len = text.chars().count();

    // (a) markup tokens
    if filter
        .deny_list
        .iter()
        .any(|token| !token.is_empty() && minified.contains(token.as_str()))
    {
        return false;
    }

    // (b) mostly numbers
    let digits = text.chars().filter(|&c| is_digit(c)).count();
    if digits * 4 > len {
        return false;
    }

    // (c) too short to be a sentence
    let punctuated = text.ends_with(['.', '!', '?']) || text.starts_with('.');
    if minified_len < 3 && !punctuated {
        return false;
    }

    // (d) no word break, unless written in characters outside the ranges
    let sentence = text.contains(' ')
        || [".\"", "!\"", "?\""].iter().any(|end| text.ends_with(end))
        || punctuated;
    if !sentence {
        let foreign = minified.chars().filter(|&c| !rules.in_range(c)).count();
        if rules.ranges.is_empty() || foreign < minified_len.saturating_sub(3) {
            return false;
        }
    }

    // (e) ends like a file extension
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > 3 && chars[chars.len() - 4] == '.' && !chars[chars.len() - 3..].contains(&'.') {
        return false;
    }

    // (f)
    text.chars().any(|c| c.is_ascii_alphabetic())
}
