//! Wildcard translation entries
//!
//! A mask key is split on `*` into literal segments. The first segment is
//! anchored at the start of the input, the last at the end, and inner
//! segments must appear in order between them. Whatever lies between two
//! segments is a capture, substituted positionally into the value's `*`s.

/// The wildcard token in mask keys and values
pub const WILDCARD: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    key: String,
    segments: Vec<String>,
    value: String,
}

impl Mask {
    /// Whether a raw key is a mask
    #[must_use]
    pub fn is_mask(key: &str) -> bool {
        key.contains(WILDCARD)
    }

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let segments = key.split(WILDCARD).map(str::to_string).collect();
        Self {
            key,
            segments,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The text matched by each `*` of the key, or `None` if `input` does not
    /// fit the mask
    #[must_use]
    pub fn captures<'a>(&self, input: &'a str) -> Option<Vec<&'a str>> {
        let (first, rest) = self.segments.split_first()?;
        let Some((last, inner)) = rest.split_last() else {
            return (input == first).then(Vec::new);
        };

        if input.len() < first.len() + last.len() {
            return None;
        }
        let body = input.strip_prefix(first.as_str())?.strip_suffix(last.as_str())?;

        let mut captures = Vec::with_capacity(inner.len() + 1);
        let mut remaining = body;
        for segment in inner {
            let at = remaining.find(segment.as_str())?;
            captures.push(&remaining[..at]);
            remaining = &remaining[at + segment.len()..];
        }
        captures.push(remaining);
        Some(captures)
    }

    /// Fill the value's `*`s with `captures`. Surplus `*`s stay literal.
    #[must_use]
    pub fn apply<S: AsRef<str>>(&self, captures: &[S]) -> String {
        let mut output = String::with_capacity(self.value.len());
        let mut captures = captures.iter();
        for (i, part) in self.value.split(WILDCARD).enumerate() {
            if i > 0 {
                match captures.next() {
                    Some(capture) => output.push_str(capture.as_ref()),
                    None => output.push(WILDCARD),
                }
            }
            output.push_str(part);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anchored_match() {
        let mask = Mask::new("Go *!", "Vai *!");
        assert_eq!(mask.captures("Go home!"), Some(vec!["home"]));
        assert_eq!(mask.captures("Go !"), Some(vec![""]));
        assert_eq!(mask.captures("Go home"), None);
        assert_eq!(mask.captures("Let's Go home!"), None);
        assert_eq!(mask.apply(&["casa"]), "Vai casa!");
    }

    #[test]
    fn test_prefix_and_suffix_do_not_overlap() {
        let mask = Mask::new("ab*ba", "x");
        assert_eq!(mask.captures("aba"), None);
        assert_eq!(mask.captures("abba"), Some(vec![""]));
    }

    #[test]
    fn test_inner_segments_in_order() {
        let mask = Mask::new("* gave * to *.", "* deu * para *.");
        let caps = mask.captures("Ann gave a book to Bob.").unwrap();
        assert_eq!(caps, vec!["Ann", "a book", "Bob"]);
        assert_eq!(mask.apply(&caps), "Ann deu a book para Bob.");
        assert_eq!(mask.captures("Ann to Bob gave."), None);
    }

    #[test]
    fn test_surplus_wildcards_kept() {
        let mask = Mask::new("Hi *", "Oi *, * *");
        assert_eq!(mask.apply(&["Ana"]), "Oi Ana, * *");
    }
}
