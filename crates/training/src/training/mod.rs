//! Training infrastructure for BPE tokenizers.
//!
//! The pipeline runs leaf-first: [`WordCounter`] counts corpus words,
//! [`PairCounter`] tracks their current segmentations and pair statistics,
//! [`BpeTrainer`] drives the merge loop and [`VocabularyBuilder`] assigns
//! the final ids.

pub mod builder;
pub mod counter;
pub mod frequency;
pub mod symbols;
pub mod trainer;

pub use builder::VocabularyBuilder;
pub use counter::{PairCounter, PairStats};
pub use frequency::{WordCounter, WordFrequencies, WORD_PATTERN};
pub use symbols::SymbolTable;
pub use trainer::{BpeTrainer, MergeOutcome, TrainingConfig};
