//! Subword-core - Core data model for subword tokenization
//!
//! This crate provides the data structures shared by every tokenizer
//! variant, independent of how a vocabulary is trained.
//!
//! # Features
//!
//! - Bijective vocabulary with contiguous ids and the four reserved special tokens
//! - Ordered merge rules as discovered by BPE training
//! - Trie-based longest-match [`Matcher`] with per-character UNK fallback
//! - [`Codec`] for lossless id <-> token conversion with UNK substitution
//! - Character- and byte-level tokenizers implementing the common [`Tokenizer`] trait
//!
//! # Example
//!
//! ```rust
//! use subword_core::{ByteTokenizer, SpecialTokens, Tokenizer};
//!
//! let tokenizer = ByteTokenizer::new(SpecialTokens::BASELINE)?;
//! let ids = tokenizer.encode("héllo", true)?;
//! assert_eq!(tokenizer.decode(&ids, true)?, "héllo");
//! # Ok::<(), subword_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Vocabulary, merge rules, matcher and codec
pub mod core;
pub use crate::core::{
    Codec, Matcher, MergeRule, MergeRules, Pair, Segment, SpecialTokens, Vocab, Vocabulary,
    VocabularyDefect,
};

// Common tokenizer interface
pub mod tokenizer;
pub use tokenizer::Tokenizer;

// Fixed-vocabulary tokenizers
pub mod encoding;
pub use encoding::{ByteTokenizer, CharTokenizer};
