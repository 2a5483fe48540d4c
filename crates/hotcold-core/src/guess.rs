//! Looking a guess up in a precomputed ranking.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::ranking::WordRanking;
use crate::vocabulary::normalize;

/// Where a guess landed in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GuessData {
    /// The normalized guess.
    pub word: String,
    /// Rank of the guess; 1 is closest to the target.
    pub rank: usize,
    /// Number of ranked words.
    pub total_words: usize,
    /// Similarity to the target.
    pub similarity: f64,
}

/// Find `guess` in `rankings`.
///
/// The guess is trimmed and lowercased first. A word missing from the
/// ranking yields [`GameError::NotInWordList`], which callers should show
/// to the player rather than treat as a failure.
pub fn evaluate_guess(guess: &str, rankings: &[WordRanking]) -> GameResult<GuessData> {
    let word = normalize(guess);
    let entry = rankings
        .iter()
        .find(|entry| entry.word.to_lowercase() == word)
        .ok_or_else(|| GameError::NotInWordList { word: word.clone() })?;

    Ok(GuessData {
        word,
        rank: entry.rank,
        total_words: rankings.len(),
        similarity: entry.similarity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rankings() -> Vec<WordRanking> {
        vec![
            WordRanking {
                word: "car".to_string(),
                similarity: 0.8,
                rank: 1,
            },
            WordRanking {
                word: "dog".to_string(),
                similarity: 0.1,
                rank: 2,
            },
        ]
    }

    #[test]
    fn finds_ranked_word() {
        let data = evaluate_guess("CAR ", &rankings()).unwrap();
        assert_eq!(
            data,
            GuessData {
                word: "car".to_string(),
                rank: 1,
                total_words: 2,
                similarity: 0.8,
            }
        );
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let r = rankings();
        assert_eq!(
            evaluate_guess(" DOG\t", &r).unwrap(),
            evaluate_guess("dog", &r).unwrap()
        );
    }

    #[test]
    fn repeated_lookups_agree() {
        let r = rankings();
        let first = evaluate_guess("dog", &r).unwrap();
        for _ in 0..3 {
            assert_eq!(evaluate_guess("dog", &r).unwrap(), first);
        }
    }

    #[test]
    fn unknown_word_is_user_error() {
        let err = evaluate_guess("Emu", &rankings()).unwrap_err();
        assert!(err.is_user_error());
        assert!(matches!(err, GameError::NotInWordList { ref word } if word == "emu"));
    }
}
