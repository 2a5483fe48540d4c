//! Checks applied to raw player input before it counts as a guess.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::vocabulary::{Vocabulary, normalize};

static LETTERS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));

/// Validate a raw guess against `vocabulary`.
///
/// Checks run in order and the first failure is returned: empty input,
/// non-letters, fewer than two letters, not a vocabulary word.
pub fn validate_guess(raw: &str, vocabulary: &Vocabulary) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !LETTERS_ONLY.is_match(raw) {
        return Err(ValidationError::NonAlphabetic);
    }
    if trimmed.chars().count() < 2 {
        return Err(ValidationError::TooShort);
    }
    if !vocabulary.contains(trimmed) {
        return Err(ValidationError::UnknownWord {
            word: normalize(trimmed),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::from_words(["ok", "cat", "ice cream"]).unwrap()
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(validate_guess("", &vocab()), Err(ValidationError::Empty));
        assert_eq!(validate_guess("  \t ", &vocab()), Err(ValidationError::Empty));
    }

    #[test]
    fn digits_are_rejected() {
        let err = validate_guess("7up", &vocab()).unwrap_err();
        assert_eq!(err, ValidationError::NonAlphabetic);
        assert!(err.to_string().contains("must contain only letters"));
    }

    #[test]
    fn punctuation_is_rejected() {
        assert_eq!(
            validate_guess("cat!", &vocab()),
            Err(ValidationError::NonAlphabetic)
        );
        assert_eq!(
            validate_guess("café", &vocab()),
            Err(ValidationError::NonAlphabetic)
        );
    }

    #[test]
    fn single_letter_is_too_short() {
        assert_eq!(validate_guess(" a ", &vocab()), Err(ValidationError::TooShort));
    }

    #[test]
    fn unknown_word() {
        let err = validate_guess("xyzzzz", &vocab()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownWord {
                word: "xyzzzz".to_string()
            }
        );
        assert_eq!(err.to_string(), "Not in word list!");
    }

    #[test]
    fn short_vocabulary_word_passes() {
        assert_eq!(validate_guess("ok", &vocab()), Ok(()));
        assert_eq!(validate_guess(" CAT ", &vocab()), Ok(()));
        assert_eq!(validate_guess("ice cream", &vocab()), Ok(()));
    }

    #[test]
    fn builtin_words_validate() {
        let vocab = Vocabulary::builtin();
        assert_eq!(validate_guess("ocean", &vocab), Ok(()));
        assert!(validate_guess("ok", &vocab).is_err());
    }
}
