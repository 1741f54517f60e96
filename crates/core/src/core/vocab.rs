//! Vocabulary storage and lookup.
//!
//! A [`Vocabulary`] is a bijection between token strings and the contiguous id
//! range `0..len`. Ids `0..4` always belong to the [`SpecialTokens`] table.
//! Forward lookups go through an `AHashMap`, reverse lookups index straight
//! into a `Vec` because ids never have gaps.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use thiserror::Error;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// The four control symbols reserved at ids 0..4 in every vocabulary.
///
/// This is a constant table handed to each tokenizer at construction. The
/// ids are fixed; only the surface strings are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Padding token
    pub pad: &'static str,
    /// Unknown token, also the placeholder emitted for uncovered input
    pub unk: &'static str,
    /// Beginning of sequence token
    pub bos: &'static str,
    /// End of sequence token
    pub eos: &'static str,
}

impl SpecialTokens {
    pub const PAD_ID: u32 = 0;
    pub const UNK_ID: u32 = 1;
    pub const BOS_ID: u32 = 2;
    pub const EOS_ID: u32 = 3;

    /// Number of reserved ids.
    pub const COUNT: usize = 4;

    /// `<PAD>`, `<UNK>`, `<BOS>`, `<EOS>`.
    pub const BASELINE: Self = Self {
        pad: "<PAD>",
        unk: "<UNK>",
        bos: "<BOS>",
        eos: "<EOS>",
    };

    /// Token strings paired with their reserved ids, in id order.
    pub fn entries(&self) -> [(&'static str, u32); Self::COUNT] {
        [
            (self.pad, Self::PAD_ID),
            (self.unk, Self::UNK_ID),
            (self.bos, Self::BOS_ID),
            (self.eos, Self::EOS_ID),
        ]
    }

    /// Check if an ID is one of the reserved special ids.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        (id as usize) < Self::COUNT
    }

    /// Check if an ID is dropped by `decode(.., skip_special_tokens = true)`.
    ///
    /// UNK is kept: it stands for genuine (unrecognized) content.
    #[inline]
    pub fn is_skippable(&self, id: u32) -> bool {
        id == Self::PAD_ID || id == Self::BOS_ID || id == Self::EOS_ID
    }

    /// Check if a string is one of the special token strings.
    pub fn contains_token(&self, token: &str) -> bool {
        self.entries().iter().any(|(t, _)| *t == token)
    }

    /// Reject tables whose strings are empty or not pairwise distinct.
    pub fn validate(&self) -> Result<()> {
        let entries = self.entries();
        for (i, (token, _)) in entries.iter().enumerate() {
            if token.is_empty() {
                return Err(TokenizerError::InvalidConfig(format!(
                    "special token at id {} is empty",
                    i
                )));
            }
            if entries[..i].iter().any(|(other, _)| other == token) {
                return Err(TokenizerError::InvalidConfig(format!(
                    "special token {:?} is used for more than one id",
                    token
                )));
            }
        }
        Ok(())
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Reasons a list of `(token, id)` entries does not form a valid vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabularyDefect {
    #[error("token {0:?} appears more than once")]
    DuplicateToken(String),

    #[error("id {id} is assigned to both {first:?} and {second:?}")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },

    #[error("ids are not contiguous: expected id {expected}, found {found}")]
    Gap { expected: u32, found: u32 },

    #[error("empty token at id {0}")]
    EmptyToken(u32),

    #[error("id {id} must be the special token {expected:?}, found {found:?}")]
    SpecialMismatch {
        id: u32,
        expected: &'static str,
        found: String,
    },
}

/// Bijective token <-> id mapping with contiguous ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping, indexed by ID
    tokens: Vec<CompactString>,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Create a vocabulary holding exactly the special tokens at ids 0..4.
    pub fn with_special_tokens(special: &SpecialTokens) -> Result<Self> {
        special.validate()?;

        let mut vocab = Self::with_capacity(SpecialTokens::COUNT);
        for (token, id) in special.entries() {
            let assigned = vocab.add_token(token)?;
            debug_assert_eq!(assigned, id);
        }
        Ok(vocab)
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token. A token that is already present
    /// keeps its existing ID; no ID is ever reassigned or duplicated.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if let Some(&id) = self.vocab.get(token) {
            return Ok(id);
        }

        let id = u32::try_from(self.tokens.len()).map_err(|_| {
            TokenizerError::VocabularyOverflow {
                max: u32::MAX as usize,
                tried: self.tokens.len() + 1,
            }
        })?;

        let token = CompactString::new(token);
        self.tokens.push(token.clone());
        self.vocab.insert(token, id);

        Ok(id)
    }

    /// Rebuild a vocabulary from `(token, id)` entries in any order.
    ///
    /// The entries must cover `0..n` exactly once each, with distinct
    /// non-empty tokens, and ids `0..4` must hold `special` in order.
    pub fn from_entries<I, S>(
        entries: I,
        special: &SpecialTokens,
    ) -> std::result::Result<Self, VocabularyDefect>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<CompactString>,
    {
        let mut entries: Vec<(CompactString, u32)> = entries
            .into_iter()
            .map(|(token, id)| (token.into(), id))
            .collect();
        entries.sort_by_key(|&(_, id)| id);

        let mut vocab = Self::with_capacity(entries.len());
        for (expected, (token, id)) in (0u32..).zip(entries) {
            if id < expected {
                let first = vocab.tokens[id as usize].to_string();
                return Err(VocabularyDefect::DuplicateId {
                    id,
                    first,
                    second: token.to_string(),
                });
            }
            if id > expected {
                return Err(VocabularyDefect::Gap {
                    expected,
                    found: id,
                });
            }
            if token.is_empty() {
                return Err(VocabularyDefect::EmptyToken(id));
            }
            if vocab.vocab.contains_key(&token) {
                return Err(VocabularyDefect::DuplicateToken(token.to_string()));
            }

            vocab.vocab.insert(token.clone(), id);
            vocab.tokens.push(token);
        }

        for (expected, id) in special.entries() {
            match vocab.get_token(id) {
                Some(found) if found == expected => {}
                found => {
                    return Err(VocabularyDefect::SpecialMismatch {
                        id,
                        expected,
                        found: found.unwrap_or_default().to_string(),
                    })
                }
            }
        }

        Ok(vocab)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(|s| s.as_str())
    }

    /// Check if a token is present.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(token, id)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        (0u32..).zip(self.tokens.iter()).map(|(id, t)| (t.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("world").unwrap();

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_id("world"), Some(1));
        assert_eq!(vocab.get_token(0), Some("hello"));
        assert_eq!(vocab.get_token(1), Some("world"));
        assert_eq!(vocab.get_token(2), None);
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_special_tokens_take_reserved_ids() {
        let vocab = Vocabulary::with_special_tokens(&SpecialTokens::BASELINE).unwrap();

        assert_eq!(vocab.len(), SpecialTokens::COUNT);
        assert_eq!(vocab.get_id("<PAD>"), Some(SpecialTokens::PAD_ID));
        assert_eq!(vocab.get_id("<UNK>"), Some(SpecialTokens::UNK_ID));
        assert_eq!(vocab.get_id("<BOS>"), Some(SpecialTokens::BOS_ID));
        assert_eq!(vocab.get_id("<EOS>"), Some(SpecialTokens::EOS_ID));
    }

    #[test]
    fn test_special_tokens_must_be_distinct() {
        let special = SpecialTokens {
            bos: "<S>",
            eos: "<S>",
            ..SpecialTokens::BASELINE
        };
        assert!(matches!(
            Vocabulary::with_special_tokens(&special),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_skippable_keeps_unk() {
        let special = SpecialTokens::BASELINE;
        assert!(special.is_skippable(0));
        assert!(!special.is_skippable(1));
        assert!(special.is_skippable(2));
        assert!(special.is_skippable(3));
        assert!(!special.is_skippable(4));
        assert!(special.is_special(1));
        assert!(!special.is_special(4));
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut vocab = Vocabulary::with_special_tokens(&SpecialTokens::BASELINE).unwrap();
        vocab.add_token("b").unwrap();
        vocab.add_token("a").unwrap();

        let tokens: Vec<&str> = vocab.iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec!["<PAD>", "<UNK>", "<BOS>", "<EOS>", "b", "a"]);
    }

    fn baseline_entries() -> Vec<(String, u32)> {
        SpecialTokens::BASELINE
            .entries()
            .iter()
            .map(|&(t, id)| (t.to_string(), id))
            .collect()
    }

    #[test]
    fn test_from_entries_accepts_any_order() {
        let mut entries = baseline_entries();
        entries.push(("b".to_string(), 5));
        entries.push(("a".to_string(), 4));
        entries.reverse();

        let vocab = Vocabulary::from_entries(entries, &SpecialTokens::BASELINE).unwrap();
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.get_id("a"), Some(4));
        assert_eq!(vocab.get_token(5), Some("b"));
    }

    #[test]
    fn test_from_entries_rejects_gap() {
        let mut entries = baseline_entries();
        entries.push(("a".to_string(), 5));

        assert_eq!(
            Vocabulary::from_entries(entries, &SpecialTokens::BASELINE),
            Err(VocabularyDefect::Gap {
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn test_from_entries_rejects_duplicate_id() {
        let mut entries = baseline_entries();
        entries.push(("a".to_string(), 4));
        entries.push(("b".to_string(), 4));

        assert!(matches!(
            Vocabulary::from_entries(entries, &SpecialTokens::BASELINE),
            Err(VocabularyDefect::DuplicateId { id: 4, .. })
        ));
    }

    #[test]
    fn test_from_entries_rejects_duplicate_token() {
        let mut entries = baseline_entries();
        entries.push(("a".to_string(), 4));
        entries.push(("a".to_string(), 5));

        assert_eq!(
            Vocabulary::from_entries(entries, &SpecialTokens::BASELINE),
            Err(VocabularyDefect::DuplicateToken("a".to_string()))
        );
    }

    #[test]
    fn test_from_entries_requires_special_tokens() {
        let entries = vec![
            ("<PAD>".to_string(), 0),
            ("<UNK>".to_string(), 1),
            ("<EOS>".to_string(), 2),
            ("<BOS>".to_string(), 3),
        ];

        assert!(matches!(
            Vocabulary::from_entries(entries, &SpecialTokens::BASELINE),
            Err(VocabularyDefect::SpecialMismatch { id: 2, .. })
        ));
    }
}
