//! Error types for hotcold-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a raw guess is rejected before it reaches the ranking.
///
/// The `Display` text is meant to be shown to the player as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing left after trimming whitespace.
    #[error("Guess cannot be empty!")]
    Empty,

    /// The input contains digits, punctuation or other non-letters.
    #[error("Guess must contain only letters (no numbers or symbols)!")]
    NonAlphabetic,

    /// Fewer than two letters after trimming.
    #[error("Guess must be at least 2 letters long!")]
    TooShort,

    /// Well-formed, but not a vocabulary word.
    #[error("Not in word list!")]
    UnknownWord {
        /// The normalized guess.
        word: String,
    },
}

/// Errors produced by the ranking core and game sessions.
#[derive(Error, Debug)]
pub enum GameError {
    /// The embedding provider failed or returned the wrong number of vectors.
    #[error("embedding failed: {reason}")]
    EmbeddingFailure {
        /// What went wrong, as reported by the provider.
        reason: String,
    },

    /// Two vectors that must share a dimension do not.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension required by the other operand or the provider contract.
        expected: usize,
        /// Dimension actually received.
        actual: usize,
    },

    /// The guess has no entry in the current ranking.
    #[error("not in word list: {word}")]
    NotInWordList {
        /// The normalized guess.
        word: String,
    },

    /// The guess failed input validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A rank outside `1..=total` was passed to the classifier.
    #[error("rank {rank} is outside 1..={total}")]
    InvalidRank {
        /// The offending rank.
        rank: usize,
        /// Number of ranked words.
        total: usize,
    },

    /// The game already ended (won or given up).
    #[error("the game is over")]
    GameOver,

    /// Giving up is not unlocked yet.
    #[error("keep trying! giving up unlocks after {remaining} more guesses")]
    GiveUpLocked {
        /// Guesses still required before giving up is allowed.
        remaining: usize,
    },

    /// A vocabulary source produced no words.
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// A vocabulary file could not be read.
    #[error("failed to read vocabulary file {path}")]
    VocabularyRead {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GameError {
    /// Build an [`GameError::EmbeddingFailure`] from anything printable.
    pub fn embedding(reason: impl std::fmt::Display) -> Self {
        Self::EmbeddingFailure {
            reason: reason.to_string(),
        }
    }

    /// Whether this error is an expected player-facing condition rather than a defect.
    ///
    /// Front ends show these to the player and carry on with the game.
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotInWordList { .. } | Self::GameOver | Self::GiveUpLocked { .. }
        )
    }
}

/// Result type alias using [`GameError`].
pub type GameResult<T> = Result<T, GameError>;
