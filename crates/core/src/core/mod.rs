//! Vocabulary, merge rules and the inference-time machinery built on them.
//!
//! Everything in this module is immutable once training (or loading) has
//! produced it, so it can be shared read-only across threads.

pub mod codec;
pub mod matcher;
pub mod merges;
pub mod vocab;

pub use codec::Codec;
pub use matcher::{Matcher, Segment, Segments};
pub use merges::{MergeRule, MergeRules, Pair};
pub use vocab::{SpecialTokens, Vocab, Vocabulary, VocabularyDefect};
