//! BPE tokenizer.
//!
//! Training produces a vocabulary and ordered merge rules; tokenization
//! never replays the merges. It runs a longest-match scan over the
//! vocabulary symbols, so a merged symbol always wins over its parts, and
//! each character no symbol covers becomes one UNK.

use super::{TokenizerBuilder, TokenizerConfig};
use crate::io::{TokenizerLoader, TokenizerSaver};
use log::debug;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use subword_core::{
    Codec, Matcher, MergeRules, Result, Segment, SpecialTokens, Tokenizer, TokenizerError,
    Vocabulary,
};
use subword_training::{BpeTrainer, TrainingConfig};

/// Frozen artifacts of a trained or loaded model.
#[derive(Debug)]
struct BpeModel {
    vocab: Vocabulary,
    merges: MergeRules,
    matcher: Matcher,
}

/// Byte Pair Encoding tokenizer.
///
/// The trained model sits behind an [`Arc`], so clones share it and
/// concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct BpeTokenizer {
    /// Configuration
    config: TokenizerConfig,
    /// `None` until `fit` or `load`
    model: Option<Arc<BpeModel>>,
}

impl BpeTokenizer {
    /// Create an untrained tokenizer.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        config.special_tokens.validate()?;
        Ok(Self {
            config,
            model: None,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Train with a new target vocabulary size.
    ///
    /// The size is kept for later calls to [`Tokenizer::fit`].
    pub fn fit_with_vocab_size(&mut self, corpus: &[&str], vocab_size: usize) -> Result<()> {
        self.config.vocab_size = vocab_size;
        self.fit(corpus)
    }

    /// Check if the tokenizer has been trained or loaded.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// The vocabulary, once trained.
    pub fn vocab(&self) -> Option<&Vocabulary> {
        self.model.as_deref().map(|model| &model.vocab)
    }

    /// The merge rules in discovery order, once trained.
    pub fn merges(&self) -> Option<&MergeRules> {
        self.model.as_deref().map(|model| &model.merges)
    }

    /// Encode several texts in parallel.
    pub fn encode_batch(&self, texts: &[&str], add_special_tokens: bool) -> Result<Vec<Vec<u32>>> {
        let model = self.model("encode_batch")?;

        Ok(texts
            .par_iter()
            .map(|text| self.encode_with(model, text, add_special_tokens))
            .collect())
    }

    /// Save `vocab.json` and `merges.txt` into `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let model = self.model("save")?;
        TokenizerSaver::new(&model.vocab, &model.merges).save(dir.as_ref())
    }

    /// Load a tokenizer saved with the baseline special tokens.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_special_tokens(dir, SpecialTokens::BASELINE)
    }

    /// Load a tokenizer, expecting `special` at ids 0..4.
    pub fn load_with_special_tokens(dir: impl AsRef<Path>, special: SpecialTokens) -> Result<Self> {
        special.validate()?;
        let (vocab, merges) = TokenizerLoader::new(special).load(dir.as_ref())?;

        let mut tokenizer = Self::new(TokenizerConfig {
            vocab_size: vocab.len(),
            special_tokens: special,
        })?;
        tokenizer.install(vocab, merges);
        Ok(tokenizer)
    }

    fn install(&mut self, vocab: Vocabulary, merges: MergeRules) {
        let matcher = Matcher::from_vocab(&vocab, &self.config.special_tokens);
        debug!(
            "compiled matcher with {} symbols (longest {} chars)",
            matcher.len(),
            matcher.max_symbol_chars()
        );

        self.model = Some(Arc::new(BpeModel {
            vocab,
            merges,
            matcher,
        }));
    }

    fn model(&self, operation: &'static str) -> Result<&BpeModel> {
        self.model
            .as_deref()
            .ok_or_else(|| TokenizerError::untrained(operation))
    }

    fn encode_with(&self, model: &BpeModel, text: &str, add_special_tokens: bool) -> Vec<u32> {
        Codec::new(&model.vocab, &self.config.special_tokens)
            .encode_segments(model.matcher.segments(text), add_special_tokens)
    }
}

impl Tokenizer for BpeTokenizer {
    /// Train on `corpus`, replacing any previous model.
    fn fit(&mut self, corpus: &[&str]) -> Result<()> {
        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: self.config.vocab_size,
            special_tokens: self.config.special_tokens,
        });
        let (vocab, merges) = trainer.train(corpus)?;

        self.install(vocab, merges);
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let model = self.model("tokenize")?;
        let codec = Codec::new(&model.vocab, &self.config.special_tokens);

        Ok(model
            .matcher
            .segments(text)
            .map(|segment| match segment {
                Segment::Token { id, .. } => codec.id_to_token(id).to_string(),
                Segment::Unknown { .. } => self.config.special_tokens.unk.to_string(),
            })
            .collect())
    }

    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let model = self.model("encode")?;
        Ok(self.encode_with(model, text, add_special_tokens))
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let model = self.model("decode")?;
        Ok(Codec::new(&model.vocab, &self.config.special_tokens).decode(
            ids,
            skip_special_tokens,
            "",
        ))
    }

    /// Zero before `fit` or `load`.
    fn vocab_size(&self) -> usize {
        self.vocab().map_or(0, Vocabulary::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subword_core::MergeRule;

    const SCENARIO: &str = "low low low low low lowest lowest newer newer newer newer newer newer \
                            wider wider wider new new";

    fn scenario() -> BpeTokenizer {
        let mut tokenizer = BpeTokenizer::builder().vocab_size(20).build().unwrap();
        tokenizer.fit(&[SCENARIO]).unwrap();
        tokenizer
    }

    #[test]
    fn test_fit_scenario() {
        let tokenizer = scenario();

        assert!(tokenizer.is_trained());
        assert_eq!(tokenizer.vocab_size(), 20);
        assert_eq!(
            tokenizer.merges().unwrap().get(0),
            Some(&MergeRule::new("e", "r"))
        );
    }

    #[test]
    fn test_tokenize_longest_match_with_unk_per_char() {
        let tokenizer = scenario();

        assert_eq!(
            tokenizer.tokenize("lowest newer").unwrap(),
            vec!["low", "e", "s", "t", "<UNK>", "newer"]
        );
        assert_eq!(
            tokenizer.tokenize("low!!").unwrap(),
            vec!["low", "<UNK>", "<UNK>"]
        );
    }

    #[test]
    fn test_encode_decode() {
        let tokenizer = scenario();

        let ids = tokenizer.encode("newer", true).unwrap();
        assert_eq!(ids, vec![2, 19, 3]);
        assert_eq!(tokenizer.decode(&ids, true).unwrap(), "newer");
        assert_eq!(tokenizer.decode(&ids, false).unwrap(), "<BOS>newer<EOS>");
    }

    #[test]
    fn test_unknown_characters_are_lossy() {
        let tokenizer = scenario();
        let ids = tokenizer.encode("low x", false).unwrap();

        assert_eq!(ids, vec![18, 1, 1]);
        assert_eq!(tokenizer.decode(&ids, true).unwrap(), "low<UNK><UNK>");
    }

    #[test]
    fn test_decode_unknown_id() {
        let tokenizer = scenario();
        assert_eq!(tokenizer.decode(&[18, 500], true).unwrap(), "low<UNK>");
    }

    #[test]
    fn test_untrained_use() {
        let tokenizer = BpeTokenizer::builder().build().unwrap();

        for result in [
            tokenizer.tokenize("a").map(|_| ()),
            tokenizer.encode("a", false).map(|_| ()),
            tokenizer.decode(&[4], true).map(|_| ()),
            tokenizer.encode_batch(&["a"], false).map(|_| ()),
            tokenizer.save(std::env::temp_dir()).map(|_| ()),
        ] {
            assert!(matches!(result, Err(TokenizerError::UntrainedUse { .. })));
        }
    }

    #[test]
    fn test_refit_replaces_model() {
        let mut tokenizer = scenario();
        tokenizer.fit_with_vocab_size(&["abab"], 7).unwrap();

        assert_eq!(tokenizer.config().vocab_size, 7);
        assert_eq!(tokenizer.vocab_size(), 7);
        assert_eq!(tokenizer.merges().unwrap().get(0), Some(&MergeRule::new("a", "b")));
        assert_eq!(tokenizer.encode("low", false).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_encode_batch_matches_encode() {
        let tokenizer = scenario();
        let texts = ["low", "newer wider", "", "lowest?"];

        let batch = tokenizer.encode_batch(&texts, true).unwrap();
        for (text, ids) in texts.iter().zip(&batch) {
            assert_eq!(ids, &tokenizer.encode(text, true).unwrap());
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let tokenizer = scenario();
        tokenizer.save(dir.path()).unwrap();

        let loaded = BpeTokenizer::load(dir.path()).unwrap();
        assert_eq!(loaded.vocab(), tokenizer.vocab());
        assert_eq!(loaded.merges(), tokenizer.merges());
        assert_eq!(loaded.config().vocab_size, 20);

        let text = "newest lower widen";
        assert_eq!(
            loaded.tokenize(text).unwrap(),
            tokenizer.tokenize(text).unwrap()
        );
    }

    #[test]
    fn test_clone_shares_model() {
        let tokenizer = scenario();
        let clone = tokenizer.clone();

        assert!(std::ptr::eq(
            tokenizer.vocab().unwrap(),
            clone.vocab().unwrap()
        ));
    }
}
