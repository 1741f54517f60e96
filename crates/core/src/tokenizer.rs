//! The interface shared by every tokenizer variant.

use crate::Result;

/// Common contract for BPE, word, character and byte tokenizers.
///
/// The trait is object safe, so callers can hold any variant behind
/// `Box<dyn Tokenizer>` and swap them freely.
pub trait Tokenizer {
    /// Train or initialize the vocabulary from `corpus`.
    ///
    /// Calling `fit` again fully replaces the previous state.
    fn fit(&mut self, corpus: &[&str]) -> Result<()>;

    /// Split `text` into token strings.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Convert `text` to ids, optionally wrapped in BOS/EOS.
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>>;

    /// Convert ids back to text, optionally dropping PAD/BOS/EOS.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String>;

    /// Current vocabulary cardinality.
    fn vocab_size(&self) -> usize;
}
