//! Error types for the subword tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// Out-of-vocabulary input and unknown ids passed to `decode` are not errors:
/// both are recovered locally by substituting the UNK token.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// `tokenize`/`encode`/`decode` called before `fit` or `load`
    #[error("Tokenizer has not been trained: call fit() or load() before {operation}()")]
    UntrainedUse { operation: &'static str },

    /// Persisted vocabulary or merges are missing, truncated or inconsistent
    #[error("Malformed persisted state in {path}: {reason}")]
    MalformedPersistedState { path: PathBuf, reason: String },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving vocabulary or merges
    #[error("Save error: {0}")]
    Save(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vocabulary overflow
    #[error("Vocabulary size exceeded maximum of {max} (tried to add {tried})")]
    VocabularyOverflow { max: usize, tried: usize },
}

impl TokenizerError {
    /// Shorthand for [`TokenizerError::UntrainedUse`].
    pub fn untrained(operation: &'static str) -> Self {
        Self::UntrainedUse { operation }
    }

    /// Shorthand for [`TokenizerError::MalformedPersistedState`].
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedPersistedState {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
