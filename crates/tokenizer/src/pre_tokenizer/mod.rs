//! Pre-tokenization pipeline.
//!
//! Normalization and word splitting applied before word-level vocabulary
//! lookup.

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{SplitPattern, Splitter, ASCII_PUNCTUATION};
