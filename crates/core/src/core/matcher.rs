//! Longest-match tokenization over a frozen vocabulary.
//!
//! The matcher compiles every non-special vocabulary symbol into a character
//! trie. Scanning left to right, it always takes the longest symbol that
//! matches at the current position, so a merged token such as `"ab"` wins
//! over its constituents `"a"` and `"b"` regardless of merge order. Input
//! that no symbol covers is reported one character at a time.

use crate::core::vocab::{SpecialTokens, Vocabulary};
use ahash::AHashMap;
use std::ops::Range;

/// Trie node for longest-match tokenization.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes indexed by character
    children: AHashMap<char, TrieNode>,
    /// Token ID if this node represents a complete token
    token_id: Option<u32>,
}

/// One step of a scan over the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A vocabulary symbol matched at `span` (byte offsets into the input)
    Token { id: u32, span: Range<usize> },
    /// A single character no vocabulary symbol covers
    Unknown { span: Range<usize> },
}

impl Segment {
    /// Byte range of this segment in the scanned text.
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::Token { span, .. } | Segment::Unknown { span } => span.clone(),
        }
    }
}

/// Compiled longest-match automaton over a vocabulary's symbols.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    root: TrieNode,
    /// Number of symbols compiled into the trie
    symbols: usize,
    /// Length in characters of the longest symbol
    max_symbol_chars: usize,
}

impl Matcher {
    /// Compile every vocabulary entry except the special tokens.
    pub fn from_vocab(vocab: &Vocabulary, special: &SpecialTokens) -> Self {
        let mut matcher = Self::default();

        for (token, id) in vocab.iter() {
            if special.is_special(id) {
                continue;
            }
            matcher.insert(token, id);
        }

        matcher
    }

    /// Insert a token string into the trie.
    fn insert(&mut self, token: &str, token_id: u32) {
        let mut node = &mut self.root;
        let mut chars = 0;

        for ch in token.chars() {
            node = node.children.entry(ch).or_default();
            chars += 1;
        }

        if chars == 0 {
            return;
        }
        if node.token_id.replace(token_id).is_none() {
            self.symbols += 1;
        }
        self.max_symbol_chars = self.max_symbol_chars.max(chars);
    }

    /// Find the longest token starting at byte offset `pos`.
    ///
    /// Returns the token ID and the match length in bytes.
    fn find_longest_match(&self, text: &str, pos: usize) -> Option<(u32, usize)> {
        let mut node = &self.root;
        let mut best_match = None;

        for (offset, ch) in text[pos..].char_indices() {
            match node.children.get(&ch) {
                Some(child) => {
                    node = child;
                    if let Some(token_id) = node.token_id {
                        best_match = Some((token_id, offset + ch.len_utf8()));
                    }
                }
                None => break,
            }
        }

        best_match
    }

    /// Scan `text` into matched symbols and uncovered characters.
    pub fn segments<'a>(&'a self, text: &'a str) -> Segments<'a> {
        Segments {
            matcher: self,
            text,
            pos: 0,
        }
    }

    /// Number of distinct symbols in the trie.
    pub fn len(&self) -> usize {
        self.symbols
    }

    /// Check if no symbol was compiled.
    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Length in characters of the longest compiled symbol.
    pub fn max_symbol_chars(&self) -> usize {
        self.max_symbol_chars
    }
}

/// Iterator returned by [`Matcher::segments`].
pub struct Segments<'a> {
    matcher: &'a Matcher,
    text: &'a str,
    pos: usize,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let start = self.pos;
        let ch = self.text[start..].chars().next()?;

        let segment = match self.matcher.find_longest_match(self.text, start) {
            Some((id, len)) => Segment::Token {
                id,
                span: start..start + len,
            },
            None => Segment::Unknown {
                span: start..start + ch.len_utf8(),
            },
        };

        self.pos = segment.span().end;
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_with(tokens: &[&str]) -> Vocabulary {
        let mut vocab = Vocabulary::with_special_tokens(&SpecialTokens::BASELINE).unwrap();
        for token in tokens {
            vocab.add_token(token).unwrap();
        }
        vocab
    }

    fn matched<'a>(matcher: &Matcher, text: &'a str) -> Vec<&'a str> {
        matcher
            .segments(text)
            .map(|s| match s {
                Segment::Token { span, .. } => &text[span],
                Segment::Unknown { .. } => "?",
            })
            .collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let vocab = vocab_with(&["a", "b", "ab"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        assert_eq!(matched(&matcher, "ab"), vec!["ab"]);
        assert_eq!(matched(&matcher, "aab"), vec!["a", "ab"]);
        assert_eq!(matched(&matcher, "ba"), vec!["b", "a"]);
    }

    #[test]
    fn test_backtracks_to_shorter_match() {
        // "abc" is absent, so "ab" must be taken before "c" is tried alone
        let vocab = vocab_with(&["a", "b", "c", "ab", "abcd"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        assert_eq!(matched(&matcher, "abc"), vec!["ab", "c"]);
        assert_eq!(matched(&matcher, "abcd"), vec!["abcd"]);
    }

    #[test]
    fn test_one_unknown_per_character() {
        let vocab = vocab_with(&["a"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        assert_eq!(matched(&matcher, "xya"), vec!["?", "?", "a"]);
    }

    #[test]
    fn test_special_tokens_are_not_matched() {
        let vocab = vocab_with(&["<", ">"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        let segments: Vec<Segment> = matcher.segments("<UNK>").collect();
        assert_eq!(segments.len(), 5);
        assert_eq!(
            segments[0],
            Segment::Token {
                id: vocab.get_id("<").unwrap(),
                span: 0..1
            }
        );
        assert_eq!(segments[1], Segment::Unknown { span: 1..2 });
    }

    #[test]
    fn test_multibyte_spans() {
        let vocab = vocab_with(&["é", "éa"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        let segments: Vec<Segment> = matcher.segments("éaü").collect();
        assert_eq!(
            segments,
            vec![
                Segment::Token {
                    id: vocab.get_id("éa").unwrap(),
                    span: 0..3
                },
                Segment::Unknown { span: 3..5 },
            ]
        );
    }

    #[test]
    fn test_stats() {
        let vocab = vocab_with(&["a", "b", "abc"]);
        let matcher = Matcher::from_vocab(&vocab, &SpecialTokens::BASELINE);

        assert_eq!(matcher.len(), 3);
        assert_eq!(matcher.max_symbol_chars(), 3);
        assert!(Matcher::default().is_empty());
        assert_eq!(Matcher::default().segments("").count(), 0);
    }
}
