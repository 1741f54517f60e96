//! Load functionality for saved tokenizers.
//!
//! Nothing is repaired on load: any inconsistency between the files is
//! reported as [`TokenizerError::MalformedPersistedState`].

use super::format::{VocabEntries, MERGES_FILE, VOCAB_FILE};
use ahash::AHashSet;
use log::info;
use std::io::ErrorKind;
use std::path::Path;
use subword_core::{MergeRule, MergeRules, Result, SpecialTokens, TokenizerError, Vocabulary};

/// Tokenizer loader - reads and validates `vocab.json` and `merges.txt`.
#[derive(Debug, Clone, Copy)]
pub struct TokenizerLoader {
    special: SpecialTokens,
}

impl TokenizerLoader {
    /// Create a loader expecting `special` at ids 0..4.
    pub fn new(special: SpecialTokens) -> Self {
        Self { special }
    }

    /// Load both files from `dir`.
    pub fn load(&self, dir: &Path) -> Result<(Vocabulary, MergeRules)> {
        let vocab = self.load_vocab(&dir.join(VOCAB_FILE))?;
        let merges = Self::load_merges(&dir.join(MERGES_FILE), &vocab)?;

        info!(
            "Loaded tokenizer with {} tokens and {} merges from {}",
            vocab.len(),
            merges.len(),
            dir.display()
        );
        Ok((vocab, merges))
    }

    /// Read `vocab.json` and check ids are unique, contiguous and start
    /// with the special tokens.
    pub fn load_vocab(&self, path: &Path) -> Result<Vocabulary> {
        let content = read(path)?;
        let entries: VocabEntries = serde_json::from_str(&content)
            .map_err(|e| TokenizerError::malformed(path, format!("invalid vocabulary: {}", e)))?;

        Vocabulary::from_entries(entries.0, &self.special)
            .map_err(|defect| TokenizerError::malformed(path, defect.to_string()))
    }

    /// Read `merges.txt`, checking every rule against `vocab`.
    ///
    /// Rules must appear in discovery order: both symbols of a rule are
    /// base characters or the result of an earlier rule, and no rule
    /// repeats.
    pub fn load_merges(path: &Path, vocab: &Vocabulary) -> Result<MergeRules> {
        let content = read(path)?;
        let mut merges = MergeRules::new();

        // Base characters are the single-char entries; merged symbols are longer.
        let mut known: AHashSet<String> = vocab
            .iter()
            .filter(|&(token, id)| id >= SpecialTokens::COUNT as u32 && token.chars().count() == 1)
            .map(|(token, _)| token.to_string())
            .collect();

        for (line_num, line) in content.lines().enumerate() {
            let rule = parse_merge_line(line).ok_or_else(|| {
                TokenizerError::malformed(
                    path,
                    format!(
                        "line {}: expected two space-separated symbols, found {:?}",
                        line_num + 1,
                        line
                    ),
                )
            })?;

            let merged = rule.merged();
            for symbol in [rule.left.as_str(), rule.right.as_str(), merged.as_str()] {
                if !vocab.contains(symbol) {
                    return Err(TokenizerError::malformed(
                        path,
                        format!(
                            "line {}: symbol {:?} is not in the vocabulary",
                            line_num + 1,
                            symbol
                        ),
                    ));
                }
            }

            for symbol in [rule.left.as_str(), rule.right.as_str()] {
                if !known.contains(symbol) {
                    return Err(TokenizerError::malformed(
                        path,
                        format!(
                            "line {}: symbol {:?} is used before the merge that produces it",
                            line_num + 1,
                            symbol
                        ),
                    ));
                }
            }

            if let Some(rank) = merges.rank(&rule) {
                return Err(TokenizerError::malformed(
                    path,
                    format!(
                        "line {}: merge {:?} repeats line {}",
                        line_num + 1,
                        rule.to_string(),
                        rank + 1
                    ),
                ));
            }

            known.insert(merged.to_string());
            merges.push(rule);
        }

        Ok(merges)
    }
}

impl Default for TokenizerLoader {
    fn default() -> Self {
        Self::new(SpecialTokens::BASELINE)
    }
}

fn parse_merge_line(line: &str) -> Option<MergeRule> {
    let mut parts = line.split(' ');
    let left = parts.next().filter(|s| !s.is_empty())?;
    let right = parts.next().filter(|s| !s.is_empty())?;
    if parts.next().is_some() {
        return None;
    }
    Some(MergeRule::new(left, right))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => TokenizerError::malformed(path, "file is missing"),
        ErrorKind::InvalidData => TokenizerError::malformed(path, "file is not valid UTF-8"),
        _ => TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        },
    })
}
