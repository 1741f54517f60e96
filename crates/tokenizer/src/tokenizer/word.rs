//! Word-level tokenizer.
//!
//! Text is lowercased (by default) and split into words and single ASCII
//! punctuation marks. The vocabulary holds the corpus words ranked by
//! descending frequency. Decoding joins tokens with single spaces, so the
//! original spacing around punctuation is not recovered.

use crate::pre_tokenizer::{NormalizationForm, Normalizer, SplitPattern, Splitter};
use log::info;
use subword_core::{Codec, Result, SpecialTokens, Tokenizer, TokenizerError, Vocabulary};
use subword_training::WordFrequencies;

/// Configuration for [`WordTokenizer`].
#[derive(Debug, Clone)]
pub struct WordTokenizerConfig {
    /// Words seen fewer times than this are left out of the vocabulary
    pub min_frequency: u64,
    /// Cap on the vocabulary size, special tokens included
    pub max_vocab_size: Option<usize>,
    /// Lowercase text before splitting
    pub lowercase: bool,
    /// How text is cut into words
    pub split: SplitPattern,
    /// Special tokens configuration
    pub special_tokens: SpecialTokens,
}

impl Default for WordTokenizerConfig {
    fn default() -> Self {
        Self {
            min_frequency: 1,
            max_vocab_size: None,
            lowercase: true,
            split: SplitPattern::Words,
            special_tokens: SpecialTokens::BASELINE,
        }
    }
}

impl WordTokenizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.special_tokens.validate()?;

        if let Some(max) = self.max_vocab_size {
            if max < SpecialTokens::COUNT {
                return Err(TokenizerError::InvalidConfig(format!(
                    "max_vocab_size {} is smaller than the {} special tokens",
                    max,
                    SpecialTokens::COUNT
                )));
            }
        }

        Ok(())
    }
}

/// Whole-word tokenizer with a frequency-ranked vocabulary.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    config: WordTokenizerConfig,
    normalizer: Normalizer,
    splitter: Splitter,
    /// `None` until `fit` has run
    vocab: Option<Vocabulary>,
}

impl WordTokenizer {
    pub fn new(config: WordTokenizerConfig) -> Result<Self> {
        config.validate()?;

        let normalizer = Normalizer::new(if config.lowercase {
            NormalizationForm::Lowercase
        } else {
            NormalizationForm::None
        });
        let splitter = Splitter::new(config.split.clone());

        Ok(Self {
            config,
            normalizer,
            splitter,
            vocab: None,
        })
    }

    pub fn config(&self) -> &WordTokenizerConfig {
        &self.config
    }

    /// The trained vocabulary, if any.
    pub fn vocab(&self) -> Option<&Vocabulary> {
        self.vocab.as_ref()
    }

    fn words(&self, text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        self.splitter
            .split(&normalized)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn trained(&self, operation: &'static str) -> Result<&Vocabulary> {
        self.vocab
            .as_ref()
            .ok_or_else(|| TokenizerError::untrained(operation))
    }
}

impl Tokenizer for WordTokenizer {
    fn fit(&mut self, corpus: &[&str]) -> Result<()> {
        let mut frequencies = WordFrequencies::new();
        for text in corpus {
            for word in self.words(text) {
                frequencies.add(&word, 1);
            }
        }

        // Stable sort: equally frequent words keep first-occurrence order.
        let mut ranked: Vec<(&str, u64)> = frequencies
            .iter()
            .filter(|&(_, count)| count >= self.config.min_frequency)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        if let Some(max) = self.config.max_vocab_size {
            ranked.truncate(max - SpecialTokens::COUNT);
        }

        let mut vocab = Vocabulary::with_special_tokens(&self.config.special_tokens)?;
        for (word, _) in ranked {
            if self.config.special_tokens.contains_token(word) {
                continue;
            }
            vocab.add_token(word)?;
        }

        info!(
            "Vocabulary size: {} words ({} distinct in corpus)",
            vocab.len(),
            frequencies.len()
        );
        self.vocab = Some(vocab);
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        self.trained("tokenize")?;
        Ok(self.words(text))
    }

    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let vocab = self.trained("encode")?;
        let codec = Codec::new(vocab, &self.config.special_tokens);
        Ok(codec.encode_tokens(self.words(text), add_special_tokens))
    }

    /// Tokens are joined with single spaces.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let vocab = self.trained("decode")?;
        Ok(Codec::new(vocab, &self.config.special_tokens).decode(ids, skip_special_tokens, " "))
    }

    /// Zero before `fit`.
    fn vocab_size(&self) -> usize {
        self.vocab.as_ref().map_or(0, Vocabulary::len)
    }
}
