//! High-level tokenizers.
//!
//! [`BpeTokenizer`] learns subword merges; [`WordTokenizer`] keeps whole
//! words ranked by frequency. Both implement the shared
//! [`subword_core::Tokenizer`] trait alongside the character and byte
//! tokenizers from `subword-core`.

mod bpe;
mod word;

pub use bpe::BpeTokenizer;
pub use word::{WordTokenizer, WordTokenizerConfig};

use subword_core::{Result, SpecialTokens};

/// Configuration for building a BPE tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Target vocabulary size, special tokens included
    pub vocab_size: usize,
    /// Special tokens configuration
    pub special_tokens: SpecialTokens,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 1000,
            special_tokens: SpecialTokens::BASELINE,
        }
    }
}

/// Builder for creating a BPE tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set special tokens.
    pub fn special_tokens(mut self, tokens: SpecialTokens) -> Self {
        self.config.special_tokens = tokens;
        self
    }

    /// Build the (untrained) tokenizer.
    pub fn build(self) -> Result<BpeTokenizer> {
        BpeTokenizer::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subword_core::{Tokenizer, TokenizerError};

    #[test]
    fn test_builder() {
        let tokenizer = BpeTokenizer::builder().vocab_size(300).build().unwrap();

        assert_eq!(tokenizer.config().vocab_size, 300);
        assert_eq!(tokenizer.config().special_tokens, SpecialTokens::BASELINE);
        assert!(!tokenizer.is_trained());
        assert_eq!(tokenizer.vocab_size(), 0);
    }

    #[test]
    fn test_builder_rejects_invalid_special_tokens() {
        let special = SpecialTokens {
            bos: "<PAD>",
            ..SpecialTokens::BASELINE
        };
        let result = TokenizerBuilder::new().special_tokens(special).build();
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.vocab_size, 1000);
    }
}
