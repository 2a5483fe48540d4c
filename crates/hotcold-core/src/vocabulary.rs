//! The fixed list of words players may guess from.
//!
//! Vocabulary files are plain text with one word per line. Blank lines and
//! lines starting with `#` are skipped; words are trimmed and lowercased.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use camino::Utf8Path;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GameError, GameResult};

static BUILTIN_SOURCE: &str = include_str!("../data/words.txt");

static BUILTIN: LazyLock<Arc<Vocabulary>> = LazyLock::new(|| {
    Arc::new(Vocabulary::parse(BUILTIN_SOURCE).expect("built-in word list is not empty"))
});

/// Normalize a word or guess for comparison: trim, then lowercase.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// An ordered, immutable set of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Vocabulary {
    /// The vocabulary bundled with the crate.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Build a vocabulary from words, normalizing each one.
    ///
    /// Order is preserved. Entries that are empty after trimming are dropped.
    pub fn from_words<I, S>(words: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }
        let index = words.iter().cloned().collect();
        Ok(Self { words, index })
    }

    /// Parse vocabulary text (one word per line, `#` comments).
    pub fn parse(text: &str) -> GameResult<Self> {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a vocabulary file.
    #[tracing::instrument]
    pub fn from_file(path: &Utf8Path) -> GameResult<Self> {
        let text =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| GameError::VocabularyRead {
                path: path.to_path_buf(),
                source,
            })?;
        let vocabulary = Self::parse(&text)?;
        tracing::debug!(words = vocabulary.len(), "vocabulary loaded");
        Ok(vocabulary)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false` for a constructed vocabulary; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in their original order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Case- and whitespace-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&normalize(word))
    }

    /// Pick a word uniformly at random.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Words other than `exclude`, sorted alphabetically and filtered by a
    /// case-insensitive substring search.
    pub fn browse(&self, exclude: Option<&str>, search: Option<&str>) -> Vec<&str> {
        let exclude = exclude.map(normalize);
        let search = search.map(normalize).filter(|s| !s.is_empty());
        let mut words: Vec<&str> = self
            .words
            .iter()
            .filter(|w| exclude.as_deref() != Some(w.as_str()))
            .filter(|w| search.as_deref().is_none_or(|term| w.contains(term)))
            .map(String::as_str)
            .collect();
        words.sort_unstable();
        words
    }
}
