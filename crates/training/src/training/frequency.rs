//! Word frequency counting over a training corpus.
//!
//! Words are maximal runs of word characters; every other non-space
//! character is a word of its own, so punctuation never sticks to a word.

use ahash::AHashMap;
use compact_str::CompactString;
use regex::Regex;
use std::sync::OnceLock;

/// Pattern used to split corpus text into words.
pub const WORD_PATTERN: &str = r"\w+|[^\w\s]";

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex"))
}

/// Distinct words with their corpus occurrence counts.
///
/// Iteration follows first occurrence in the corpus, which gives training a
/// fixed canonical order to break ties in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencies {
    /// (word, count) in first-occurrence order
    words: Vec<(CompactString, u64)>,
    /// word -> position in `words`
    index: AHashMap<CompactString, usize>,
}

impl WordFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word`.
    pub fn add(&mut self, word: &str, count: u64) {
        match self.index.get(word) {
            Some(&pos) => self.words[pos].1 += count,
            None => {
                let word = CompactString::new(word);
                self.index.insert(word.clone(), self.words.len());
                self.words.push((word, count));
            }
        }
    }

    /// Occurrence count of `word`, if it was seen.
    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&pos| self.words[pos].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of word occurrences.
    pub fn total(&self) -> u64 {
        self.words.iter().map(|(_, count)| count).sum()
    }

    /// Iterate over `(word, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.words.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

/// Frequency counter for whitespace/punctuation-delimited words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl WordCounter {
    /// Split `text` into words.
    pub fn split(text: &str) -> impl Iterator<Item = &str> + '_ {
        word_regex().find_iter(text).map(|m| m.as_str())
    }

    /// Count every word of every text in `corpus`.
    pub fn count(corpus: &[&str]) -> WordFrequencies {
        let mut frequencies = WordFrequencies::new();

        for text in corpus {
            for word in Self::split(text) {
                frequencies.add(word, 1);
            }
        }

        frequencies
    }
}
