//! Case normalization for pre-tokenization.
//!
//! Only case folding is offered; text is otherwise handled as raw code
//! points.

use std::borrow::Cow;

/// Normalization applied before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    /// Unicode lowercase mapping
    #[default]
    Lowercase,
    /// No normalization
    None,
}

/// Text normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Create a lowercasing normalizer (default).
    pub fn lowercase() -> Self {
        Self::new(NormalizationForm::Lowercase)
    }

    /// Normalize text, borrowing when nothing changes.
    pub fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.form {
            NormalizationForm::Lowercase if text.chars().any(changes_case) => {
                Cow::Owned(text.to_lowercase())
            }
            _ => Cow::Borrowed(text),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}

fn changes_case(ch: char) -> bool {
    !ch.to_lowercase().eq(std::iter::once(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let normalizer = Normalizer::lowercase();
        assert_eq!(normalizer.normalize("Hello WORLD"), "hello world");
        assert_eq!(normalizer.normalize("ÉCOLE Straße"), "école straße");
    }

    #[test]
    fn test_lowercase_borrows_unchanged_text() {
        let normalizer = Normalizer::lowercase();
        assert!(matches!(normalizer.normalize("already lower"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_no_normalization() {
        let normalizer = Normalizer::new(NormalizationForm::None);
        let text = "Hello";
        let result = normalizer.normalize(text);
        assert_eq!(result, "Hello");
    }

    #[test]
    fn test_is_enabled() {
        assert!(Normalizer::lowercase().is_enabled());
        assert!(!Normalizer::new(NormalizationForm::None).is_enabled());
    }
}
