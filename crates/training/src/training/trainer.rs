//! BPE trainer implementation.
//!
//! Training starts from single characters and repeatedly merges the most
//! frequent adjacent pair until the merge budget `vocab_size - C - 4` is
//! spent or no pair is left, where `C` is the number of distinct characters.

use super::builder::VocabularyBuilder;
use super::counter::PairCounter;
use super::frequency::{WordCounter, WordFrequencies};
use super::symbols::SymbolTable;
use compact_str::CompactString;
use log::{debug, info, warn};
use subword_core::{MergeRules, Result, SpecialTokens, Vocabulary};

/// Log progress every this many merges.
const PROGRESS_INTERVAL: usize = 100;

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Target vocabulary size, special tokens included
    pub vocab_size: usize,
    /// Reserved control symbols at ids 0..4
    pub special_tokens: SpecialTokens,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 1000,
            special_tokens: SpecialTokens::BASELINE,
        }
    }
}

/// Raw output of the merge loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Distinct corpus characters, sorted
    pub base_symbols: Vec<CompactString>,
    /// Merge rules in discovery order
    pub merges: MergeRules,
}

/// BPE trainer.
///
/// Trains a BPE vocabulary from text by iteratively merging the most
/// frequent adjacent symbol pair. Pair frequency ties go to the pair met
/// first when scanning words in order of first corpus occurrence, pairs
/// left to right, so a corpus always trains to the same merges.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a trainer with the baseline special tokens.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on `corpus`.
    ///
    /// # Returns
    /// The trained vocabulary and merge rules
    pub fn train(&self, corpus: &[&str]) -> Result<(Vocabulary, MergeRules)> {
        self.train_frequencies(&WordCounter::count(corpus))
    }

    /// Train on precomputed word frequencies.
    pub fn train_frequencies(
        &self,
        frequencies: &WordFrequencies,
    ) -> Result<(Vocabulary, MergeRules)> {
        self.config.special_tokens.validate()?;

        let outcome = self.learn_merges(frequencies);
        let vocab = VocabularyBuilder::new(self.config.special_tokens)
            .base_symbols(outcome.base_symbols)
            .merges(&outcome.merges)
            .build()?;

        info!(
            "trained vocabulary of {} tokens ({} merges, target {})",
            vocab.len(),
            outcome.merges.len(),
            self.config.vocab_size
        );
        if vocab.len() > self.config.vocab_size {
            warn!(
                "vocabulary size {} exceeds target {}: characters and special tokens alone do not fit",
                vocab.len(),
                self.config.vocab_size
            );
        }

        Ok((vocab, outcome.merges))
    }

    /// Run the merge loop without building a vocabulary.
    pub fn learn_merges(&self, frequencies: &WordFrequencies) -> MergeOutcome {
        let mut symbols = SymbolTable::new();
        let mut counter = PairCounter::from_frequencies(frequencies, &mut symbols);

        // Every symbol interned so far is a single character.
        let mut base_symbols: Vec<CompactString> = (0..symbols.len() as u32)
            .map(|id| CompactString::new(symbols.symbol(id)))
            .collect();
        base_symbols.sort_unstable();

        let budget = self.merge_budget(base_symbols.len());
        if budget == 0 {
            debug!(
                "no merges: {} characters and {} special tokens already reach target {}",
                base_symbols.len(),
                SpecialTokens::COUNT,
                self.config.vocab_size
            );
        }

        // Sized by the merges actually found, not by the budget.
        let mut merges = MergeRules::new();
        for i in 0..budget {
            let stats = counter.count_pairs();
            let Some((pair, count)) = stats.best() else {
                debug!("pairs exhausted after {} of {} merges", i, budget);
                break;
            };

            let rule = symbols.rule(pair);
            let merged = rule.merged();
            let new_id = symbols.intern(&merged);
            let occurrences = counter.merge_pair_in_words(pair, new_id);

            debug!(
                "merge {}: ({}, {}) freq={} occurrences={}",
                i + 1,
                rule.left,
                rule.right,
                count,
                occurrences
            );
            if (i + 1) % PROGRESS_INTERVAL == 0 || i + 1 == budget {
                info!(
                    "merge {}/{}: ({}, {}) -> {}",
                    i + 1,
                    budget,
                    rule.left,
                    rule.right,
                    merged
                );
            }

            merges.push(rule);
        }

        MergeOutcome {
            base_symbols,
            merges,
        }
    }

    /// Number of merges to attempt for `base_count` distinct characters.
    fn merge_budget(&self, base_count: usize) -> usize {
        self.config
            .vocab_size
            .saturating_sub(base_count)
            .saturating_sub(SpecialTokens::COUNT)
    }
}
