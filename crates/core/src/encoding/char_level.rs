//! Character-level tokenization.
//!
//! Each Unicode code point is one token. `fit` collects the distinct code
//! points of the corpus and assigns them ids in sorted order after the
//! special tokens.

use crate::core::codec::Codec;
use crate::core::vocab::{SpecialTokens, Vocabulary};
use crate::error::TokenizerError;
use crate::tokenizer::Tokenizer;
use crate::Result;
use std::collections::BTreeSet;

/// Character-level tokenizer.
#[derive(Debug, Clone)]
pub struct CharTokenizer {
    special: SpecialTokens,
    /// `None` until `fit` has run
    vocab: Option<Vocabulary>,
}

impl CharTokenizer {
    /// Create an untrained character tokenizer.
    pub fn new(special: SpecialTokens) -> Result<Self> {
        special.validate()?;
        Ok(Self {
            special,
            vocab: None,
        })
    }

    /// The trained vocabulary, if any.
    pub fn vocab(&self) -> Option<&Vocabulary> {
        self.vocab.as_ref()
    }

    fn trained(&self, operation: &'static str) -> Result<&Vocabulary> {
        self.vocab
            .as_ref()
            .ok_or_else(|| TokenizerError::untrained(operation))
    }
}

impl Tokenizer for CharTokenizer {
    fn fit(&mut self, corpus: &[&str]) -> Result<()> {
        let chars: BTreeSet<char> = corpus.iter().flat_map(|text| text.chars()).collect();

        let mut vocab = Vocabulary::with_special_tokens(&self.special)?;
        let mut buf = [0u8; 4];
        for ch in chars {
            vocab.add_token(ch.encode_utf8(&mut buf))?;
        }

        self.vocab = Some(vocab);
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        self.trained("tokenize")?;
        Ok(text.chars().map(String::from).collect())
    }

    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let vocab = self.trained("encode")?;
        let codec = Codec::new(vocab, &self.special);

        let mut buf = [0u8; 4];
        let ids = text
            .chars()
            .map(|ch| codec.token_to_id(ch.encode_utf8(&mut buf)))
            .collect::<Vec<_>>();

        Ok(codec.wrap(ids, add_special_tokens))
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let vocab = self.trained("decode")?;
        Ok(Codec::new(vocab, &self.special).decode(ids, skip_special_tokens, ""))
    }

    /// Zero before `fit`.
    fn vocab_size(&self) -> usize {
        self.vocab.as_ref().map_or(0, Vocabulary::len)
    }
}
