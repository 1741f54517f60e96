//! Persistence for trained BPE tokenizers.
//!
//! A model directory holds `vocab.json` and `merges.txt`. Only the
//! vocabulary is needed to rebuild the matcher; the merges are kept so a
//! loaded model can be audited or saved again unchanged.

pub mod format;
pub mod load;
pub mod save;

pub use format::{VocabEntries, VocabJson, MERGES_FILE, VOCAB_FILE};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;
