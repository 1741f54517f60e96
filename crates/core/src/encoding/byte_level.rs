//! Byte-level tokenization.
//!
//! Every UTF-8 byte is its own token, so any input round-trips exactly and
//! no training is needed. Byte `b` is written as the symbol `0x{b:02x}` and
//! has id `b + 4`; ids 0..4 are the special tokens.

use crate::core::codec::Codec;
use crate::core::vocab::{SpecialTokens, Vocabulary};
use crate::tokenizer::Tokenizer;
use crate::Result;

/// ID of byte `0x00`. Byte `b` has id `BYTE_ID_OFFSET + b`.
pub const BYTE_ID_OFFSET: u32 = SpecialTokens::COUNT as u32;

/// Number of byte symbols.
const BYTE_COUNT: u32 = 256;

/// Format a byte the way [`ByteTokenizer::tokenize`] reports it.
pub fn byte_symbol(byte: u8) -> String {
    format!("0x{:02x}", byte)
}

/// Tokenizer over raw UTF-8 bytes with a fixed 260-entry vocabulary.
#[derive(Debug, Clone)]
pub struct ByteTokenizer {
    special: SpecialTokens,
    vocab: Vocabulary,
}

impl ByteTokenizer {
    /// Create a byte tokenizer. The vocabulary is complete at construction.
    pub fn new(special: SpecialTokens) -> Result<Self> {
        let mut vocab = Vocabulary::with_special_tokens(&special)?;
        for byte in 0..=u8::MAX {
            vocab.add_token(&byte_symbol(byte))?;
        }

        Ok(Self { special, vocab })
    }

    /// The fixed vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    #[inline]
    fn byte_id(byte: u8) -> u32 {
        BYTE_ID_OFFSET + byte as u32
    }

    #[inline]
    fn id_byte(id: u32) -> Option<u8> {
        id.checked_sub(BYTE_ID_OFFSET)
            .filter(|&b| b < BYTE_COUNT)
            .map(|b| b as u8)
    }
}

impl Tokenizer for ByteTokenizer {
    /// The byte vocabulary is fixed; fitting changes nothing.
    fn fit(&mut self, _corpus: &[&str]) -> Result<()> {
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .bytes()
            .map(|b| {
                self.vocab
                    .get_token(Self::byte_id(b))
                    .map_or_else(|| byte_symbol(b), str::to_string)
            })
            .collect())
    }

    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let codec = Codec::new(&self.vocab, &self.special);
        Ok(codec.wrap(text.bytes().map(Self::byte_id), add_special_tokens))
    }

    /// Invalid UTF-8 sequences decode to U+FFFD.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let codec = Codec::new(&self.vocab, &self.special);
        let mut bytes = Vec::with_capacity(ids.len());

        for &id in ids {
            if skip_special_tokens && self.special.is_skippable(id) {
                continue;
            }
            match Self::id_byte(id) {
                Some(byte) => bytes.push(byte),
                None => bytes.extend_from_slice(codec.id_to_token(id).as_bytes()),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }
}
