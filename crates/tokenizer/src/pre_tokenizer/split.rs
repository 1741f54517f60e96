//! Text splitting for pre-tokenization.
//!
//! Splitters cut text into word-level pieces before vocabulary lookup.
//! Every pattern describes the pieces to keep; whatever lies between
//! matches is dropped.

use regex::Regex;
use std::sync::OnceLock;

/// ASCII punctuation, each character of which is a token of its own.
pub const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

fn words_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"\b\w+\b|[{}]", regex::escape(ASCII_PUNCTUATION));
        Regex::new(&pattern).expect("word pattern is a valid regex")
    })
}

/// Splitting patterns.
#[derive(Debug, Clone, Default)]
pub enum SplitPattern {
    /// Runs of word characters, plus each ASCII punctuation character
    #[default]
    Words,
    /// Runs of non-whitespace
    Whitespace,
    /// Every match of a custom regex
    Custom(Regex),
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    /// Pattern to split on
    pattern: SplitPattern,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new(pattern: SplitPattern) -> Self {
        Self { pattern }
    }

    /// Create a word/punctuation splitter.
    pub fn words() -> Self {
        Self::new(SplitPattern::Words)
    }

    /// Create a whitespace splitter.
    pub fn whitespace() -> Self {
        Self::new(SplitPattern::Whitespace)
    }

    /// Split text into pieces.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.pattern {
            SplitPattern::Words => words_regex().find_iter(text).map(|m| m.as_str()).collect(),
            SplitPattern::Whitespace => text.split_whitespace().collect(),
            SplitPattern::Custom(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_split() {
        let splitter = Splitter::words();
        let result = splitter.split("Hello, world! It's 3.14 -- ok?");
        assert_eq!(
            result,
            vec![
                "Hello", ",", "world", "!", "It", "'", "s", "3", ".", "14", "-", "-", "ok", "?"
            ]
        );
    }

    #[test]
    fn test_words_drop_non_ascii_punctuation() {
        let splitter = Splitter::words();
        assert_eq!(splitter.split("naïve — café «x»"), vec!["naïve", "café", "x"]);
    }

    #[test]
    fn test_whitespace_split() {
        let splitter = Splitter::whitespace();
        let result = splitter.split("hello world  test");
        assert_eq!(result, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_custom_split() {
        let splitter = Splitter::new(SplitPattern::Custom(Regex::new(r"[a-z]+").unwrap()));
        let result = splitter.split("abc123def");
        assert_eq!(result, vec!["abc", "def"]);
    }

    #[test]
    fn test_empty_string() {
        let splitter = Splitter::words();
        let result = splitter.split("");
        assert_eq!(result, Vec::<&str>::new());
    }
}
