//! Final vocabulary assembly.

use compact_str::CompactString;
use std::collections::BTreeSet;
use subword_core::{MergeRules, Result, SpecialTokens, Vocabulary};

/// Assembles a [`Vocabulary`] from special tokens, base symbols and merges.
///
/// Ids are assigned in three blocks: the special tokens at 0..4, the base
/// symbols in sorted order, then each merge result in discovery order.
/// A merge result that is already present keeps its first id.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    special: SpecialTokens,
    base_symbols: BTreeSet<CompactString>,
    merged_symbols: Vec<CompactString>,
}

impl VocabularyBuilder {
    pub fn new(special: SpecialTokens) -> Self {
        Self {
            special,
            base_symbols: BTreeSet::new(),
            merged_symbols: Vec::new(),
        }
    }

    /// Add base symbols. Order and duplicates do not matter.
    pub fn base_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.base_symbols
            .extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Append the result of every rule in `merges`, in rank order.
    pub fn merges(mut self, merges: &MergeRules) -> Self {
        self.merged_symbols
            .extend(merges.iter().map(|rule| rule.merged()));
        self
    }

    pub fn build(self) -> Result<Vocabulary> {
        let mut vocab = Vocabulary::with_special_tokens(&self.special)?;

        for symbol in self.base_symbols.iter().chain(self.merged_symbols.iter()) {
            vocab.add_token(symbol)?;
        }

        Ok(vocab)
    }
}
