//! Save functionality for trained tokenizers.

use super::format::{VocabJson, MERGES_FILE, VOCAB_FILE};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use subword_core::{MergeRules, Result, TokenizerError, Vocabulary};

/// Tokenizer saver - writes `vocab.json` and `merges.txt`.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
    /// Merge rules reference
    merges: &'a MergeRules,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(vocab: &'a Vocabulary, merges: &'a MergeRules) -> Self {
        Self { vocab, merges }
    }

    /// Save both files into `dir`, creating it if needed.
    ///
    /// Existing files are overwritten.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| {
            TokenizerError::Save(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        self.save_vocab(&dir.join(VOCAB_FILE))?;
        self.save_merges(&dir.join(MERGES_FILE))?;

        info!(
            "Saved tokenizer with {} tokens and {} merges to {}",
            self.vocab.len(),
            self.merges.len(),
            dir.display()
        );
        Ok(())
    }

    /// Write the vocabulary as pretty-printed JSON in id order.
    pub fn save_vocab(&self, path: &Path) -> Result<()> {
        let mut writer = create(path)?;
        serde_json::to_writer_pretty(&mut writer, &VocabJson(self.vocab))?;
        flush(writer, path)
    }

    /// Write one `left right` line per merge rule.
    pub fn save_merges(&self, path: &Path) -> Result<()> {
        let mut writer = create(path)?;
        for rule in self.merges {
            writeln!(writer, "{}", rule).map_err(|e| {
                TokenizerError::Save(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }
        flush(writer, path)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TokenizerError::Save(format!(
            "Failed to create file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn flush(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|e| {
        TokenizerError::Save(format!("Failed to write {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use subword_core::{MergeRule, SpecialTokens};

    fn fixture() -> (Vocabulary, MergeRules) {
        let mut vocab = Vocabulary::with_special_tokens(&SpecialTokens::BASELINE).unwrap();
        for token in ["a", "b", "ab"] {
            vocab.add_token(token).unwrap();
        }
        let merges = [MergeRule::new("a", "b")].into_iter().collect();
        (vocab, merges)
    }

    #[test]
    fn test_save_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let (vocab, merges) = fixture();

        TokenizerSaver::new(&vocab, &merges).save(dir.path()).unwrap();

        let vocab_json = std::fs::read_to_string(dir.path().join(VOCAB_FILE)).unwrap();
        let merges_txt = std::fs::read_to_string(dir.path().join(MERGES_FILE)).unwrap();

        assert!(vocab_json.contains("\"ab\": 6"));
        assert_eq!(merges_txt, "a b\n");
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("models").join("bpe");
        let (vocab, merges) = fixture();

        TokenizerSaver::new(&vocab, &merges).save(&nested).unwrap();
        assert!(nested.join(VOCAB_FILE).is_file());
    }

    #[test]
    fn test_empty_merges_file() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = Vocabulary::with_special_tokens(&SpecialTokens::BASELINE).unwrap();

        TokenizerSaver::new(&vocab, &MergeRules::new())
            .save(dir.path())
            .unwrap();

        let merges_txt = std::fs::read_to_string(dir.path().join(MERGES_FILE)).unwrap();
        assert!(merges_txt.is_empty());
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "not a directory").unwrap();
        let (vocab, merges) = fixture();

        let result = TokenizerSaver::new(&vocab, &merges).save(&blocker);
        assert!(matches!(result, Err(TokenizerError::Save(_))));
    }
}
