//! Conversion between token strings and ids.
//!
//! The codec is shared by every vocabulary-backed tokenizer. Lookups never
//! fail: a token missing from the vocabulary encodes to the UNK id and an id
//! outside the vocabulary decodes to the UNK literal.

use crate::core::matcher::Segment;
use crate::core::vocab::{SpecialTokens, Vocabulary};

/// Encode/decode view over a frozen vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    vocab: &'a Vocabulary,
    special: &'a SpecialTokens,
}

impl<'a> Codec<'a> {
    pub fn new(vocab: &'a Vocabulary, special: &'a SpecialTokens) -> Self {
        Self { vocab, special }
    }

    /// ID of `token`, or the UNK id if the token is not in the vocabulary.
    #[inline]
    pub fn token_to_id(&self, token: &str) -> u32 {
        self.vocab.get_id(token).unwrap_or(SpecialTokens::UNK_ID)
    }

    /// Token string for `id`, or the UNK literal if the id is unknown.
    #[inline]
    pub fn id_to_token(&self, id: u32) -> &'a str {
        self.vocab.get_token(id).unwrap_or(self.special.unk)
    }

    /// Turn matcher output into ids. Uncovered characters become UNK.
    pub fn encode_segments<I>(&self, segments: I, add_special_tokens: bool) -> Vec<u32>
    where
        I: IntoIterator<Item = Segment>,
    {
        let ids = segments.into_iter().map(|segment| match segment {
            Segment::Token { id, .. } => id,
            Segment::Unknown { .. } => SpecialTokens::UNK_ID,
        });
        self.wrap(ids, add_special_tokens)
    }

    /// Map token strings to ids.
    pub fn encode_tokens<I, S>(&self, tokens: I, add_special_tokens: bool) -> Vec<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = tokens.into_iter().map(|t| self.token_to_id(t.as_ref()));
        self.wrap(ids, add_special_tokens)
    }

    /// Collect ids, optionally between BOS and EOS.
    pub fn wrap<I>(&self, ids: I, add_special_tokens: bool) -> Vec<u32>
    where
        I: IntoIterator<Item = u32>,
    {
        let ids = ids.into_iter();
        let mut out = Vec::with_capacity(ids.size_hint().0 + 2);

        if add_special_tokens {
            out.push(SpecialTokens::BOS_ID);
        }
        out.extend(ids);
        if add_special_tokens {
            out.push(SpecialTokens::EOS_ID);
        }

        out
    }

    /// Token strings for `ids`, dropping PAD/BOS/EOS when requested.
    pub fn decode_tokens<'b>(
        &'b self,
        ids: &'b [u32],
        skip_special_tokens: bool,
    ) -> impl Iterator<Item = &'a str> + 'b {
        ids.iter()
            .copied()
            .filter(move |&id| !(skip_special_tokens && self.special.is_skippable(id)))
            .map(move |id| self.id_to_token(id))
    }

    /// Decode ids and join the tokens with `separator`.
    pub fn decode(&self, ids: &[u32], skip_special_tokens: bool, separator: &str) -> String {
        let mut text = String::new();

        for (i, token) in self.decode_tokens(ids, skip_special_tokens).enumerate() {
            if i > 0 {
                text.push_str(separator);
            }
            text.push_str(token);
        }

        text
    }
}
