//! Subword-tokenizer - High-level tokenizer API
//!
//! This crate ties the vocabulary, matcher and codec from `subword-core`
//! and the trainer from `subword-training` into ready-to-use tokenizers.
//!
//! # Features
//!
//! - [`BpeTokenizer`]: trained subword vocabulary with longest-match
//!   tokenization and one UNK per uncovered character
//! - [`WordTokenizer`]: frequency-ranked whole-word vocabulary
//! - [`CharTokenizer`] and [`ByteTokenizer`] re-exported from `subword-core`
//! - All four are interchangeable through the [`Tokenizer`] trait
//! - `vocab.json` + `merges.txt` persistence for BPE models
//!
//! # Example
//!
//! ```rust
//! use subword_tokenizer::{BpeTokenizer, Tokenizer};
//!
//! let mut tokenizer = BpeTokenizer::builder().vocab_size(30).build()?;
//! tokenizer.fit(&["low lower lowest newer wider"])?;
//!
//! let ids = tokenizer.encode("lowest", true)?;
//! assert_eq!(ids.first(), Some(&2));
//! assert_eq!(tokenizer.decode(&ids, true)?, "lowest");
//! # Ok::<(), subword_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use subword_core::{
    ByteTokenizer, CharTokenizer, MergeRule, MergeRules, Result, SpecialTokens, Tokenizer,
    TokenizerError, Vocabulary,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    BpeTokenizer, TokenizerBuilder, TokenizerConfig, WordTokenizer, WordTokenizerConfig,
};

// IO/Serialization
pub mod io;
pub use io::{TokenizerLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{Normalizer, SplitPattern, Splitter};
