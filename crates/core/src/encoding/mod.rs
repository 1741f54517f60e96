//! Tokenizers with fixed or frequency-free vocabularies.
//!
//! - Byte-level: every UTF-8 byte is a token
//! - Character-level: every Unicode code point is a token

pub mod byte_level;
pub mod char_level;

pub use byte_level::{byte_symbol, ByteTokenizer, BYTE_ID_OFFSET};
pub use char_level::CharTokenizer;
