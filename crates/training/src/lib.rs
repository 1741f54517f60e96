//! Subword-training - BPE training infrastructure
//!
//! This crate learns BPE merge rules and the matching vocabulary from a
//! corpus of texts.
//!
//! # Features
//!
//! - Regex word splitting with punctuation kept as separate words
//! - Interned symbol ids so merges rewrite integer sequences in place
//! - Deterministic pair selection (first-encountered pair wins ties)
//! - Vocabulary assembly with special tokens, sorted base characters and
//!   merge results in discovery order
//!
//! # Example
//!
//! ```rust
//! use subword_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 20,
//!     ..Default::default()
//! });
//! let (vocab, merges) = trainer.train(&["low lower lowest"])?;
//!
//! assert!(vocab.len() <= 20);
//! assert_eq!(merges.get(0).map(|rule| rule.merged()).as_deref(), Some("lo"));
//! # Ok::<(), subword_training::TokenizerError>(())
//! ```

pub use subword_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, MergeOutcome, PairCounter, PairStats, SymbolTable, TrainingConfig,
    VocabularyBuilder, WordCounter, WordFrequencies,
};
