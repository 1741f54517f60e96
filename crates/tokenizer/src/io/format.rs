//! On-disk layout of a trained BPE tokenizer.
//!
//! A model directory holds two files:
//! - `vocab.json`: one JSON object mapping token string to id, written in
//!   ascending id order, pretty-printed, UTF-8 without escaping
//! - `merges.txt`: one `left right` line per merge rule in discovery order

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use subword_core::Vocabulary;

/// Vocabulary file name inside a model directory.
pub const VOCAB_FILE: &str = "vocab.json";

/// Merges file name inside a model directory.
pub const MERGES_FILE: &str = "merges.txt";

/// Serialization view of a vocabulary as a `{token: id}` object.
///
/// Keys are emitted in id order so equal vocabularies serialize to
/// identical bytes.
pub struct VocabJson<'a>(pub &'a Vocabulary);

impl Serialize for VocabJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (token, id) in self.0.iter() {
            map.serialize_entry(token, &id)?;
        }
        map.end()
    }
}

/// Raw `(token, id)` entries read from `vocab.json`.
///
/// Entries are kept exactly as written, duplicates included, so that
/// validation can reject them instead of silently keeping the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabEntries(pub Vec<(String, u32)>);

impl<'de> Deserialize<'de> for VocabEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = VocabEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping token strings to integer ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((token, id)) = access.next_entry::<String, u32>()? {
                    entries.push((token, id));
                }
                Ok(VocabEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
