//! A single game: one target, one ranking, a history of guesses.
//!
//! Ranking is computed lazily on the first guess (or an explicit
//! [`GameSession::rankings`] call) and then reused for the rest of the game.
//! Concurrent calls made while the ranking is still being computed wait for
//! that computation instead of starting another provider call.

use std::sync::Arc;

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::config::{Config, DEFAULT_GIVE_UP_AFTER};
use crate::error::{GameError, GameResult};
use crate::feedback::{Feedback, classify};
use crate::guess::{GuessData, evaluate_guess};
use crate::model::ModelCache;
use crate::ranking::{Rankings, compute_rankings};
use crate::validate::validate_guess;
use crate::vocabulary::{Vocabulary, normalize};

/// Per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Guesses required before [`GameSession::give_up`] is allowed.
    pub give_up_after: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            give_up_after: DEFAULT_GIVE_UP_AFTER,
        }
    }
}

impl From<&Config> for GameOptions {
    fn from(config: &Config) -> Self {
        Self {
            give_up_after: config.give_up_after(),
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Still accepting guesses.
    InProgress,
    /// The target was guessed.
    Won,
    /// The player gave up.
    GaveUp,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guess was ranked.
    Ranked {
        /// Rank data for the guess.
        guess: GuessData,
        /// Temperature for the rank.
        feedback: Feedback,
    },
    /// The guess was the target.
    Won {
        /// The target word.
        word: String,
        /// Guesses taken, including the winning one.
        guesses: usize,
    },
}

/// Serializable overview of a game.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct GameSummary {
    /// Current status.
    pub status: GameStatus,
    /// Accepted guesses so far.
    pub guesses: usize,
    /// Letters in the target.
    pub target_len: usize,
    /// Number of ranked words, once the ranking exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_words: Option<usize>,
    /// The target, revealed once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// State of one game.
#[derive(Debug)]
pub struct GameSession {
    target: String,
    vocabulary: Arc<Vocabulary>,
    model: Arc<ModelCache>,
    options: GameOptions,
    rankings: OnceCell<Arc<Rankings>>,
    history: Vec<GuessData>,
    guesses: usize,
    status: GameStatus,
}

impl GameSession {
    /// Start a game with a target drawn from `vocabulary` by the thread RNG.
    pub fn new(vocabulary: Arc<Vocabulary>, model: Arc<ModelCache>, options: GameOptions) -> Self {
        Self::with_rng(vocabulary, model, options, &mut rand::thread_rng())
    }

    /// Start a game with a target drawn using `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        vocabulary: Arc<Vocabulary>,
        model: Arc<ModelCache>,
        options: GameOptions,
        rng: &mut R,
    ) -> Self {
        let target = vocabulary.random_word(rng).to_string();
        Self::start(target, vocabulary, model, options)
    }

    /// Start a game with a chosen target, which must be a vocabulary word.
    pub fn with_target(
        target: &str,
        vocabulary: Arc<Vocabulary>,
        model: Arc<ModelCache>,
        options: GameOptions,
    ) -> GameResult<Self> {
        let target = normalize(target);
        if !vocabulary.contains(&target) {
            return Err(GameError::NotInWordList { word: target });
        }
        Ok(Self::start(target, vocabulary, model, options))
    }

    fn start(
        target: String,
        vocabulary: Arc<Vocabulary>,
        model: Arc<ModelCache>,
        options: GameOptions,
    ) -> Self {
        tracing::debug!(target_len = target.len(), "new game");
        Self {
            target,
            vocabulary,
            model,
            options,
            rankings: OnceCell::new(),
            history: Vec::new(),
            guesses: 0,
            status: GameStatus::InProgress,
        }
    }

    /// The ranking for this game's target, computed on first use.
    pub async fn rankings(&self) -> GameResult<Arc<Rankings>> {
        let rankings = self
            .rankings
            .get_or_try_init(|| async {
                let provider = self.model.get().await?;
                let rankings =
                    compute_rankings(&self.target, self.vocabulary.words(), provider.as_ref())
                        .await?;
                Ok::<_, GameError>(Arc::new(rankings))
            })
            .await?;
        Ok(Arc::clone(rankings))
    }

    /// Whether the ranking has been computed.
    pub fn is_ranked(&self) -> bool {
        self.rankings.initialized()
    }

    /// Submit a raw guess.
    ///
    /// Invalid guesses and words missing from the ranking are returned as
    /// errors and leave the game untouched.
    #[tracing::instrument(skip(self), fields(guesses = self.guesses))]
    pub async fn submit(&mut self, raw: &str) -> GameResult<GuessOutcome> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }
        validate_guess(raw, &self.vocabulary)?;

        let word = normalize(raw);
        if word == self.target {
            self.guesses += 1;
            self.status = GameStatus::Won;
            tracing::debug!(guesses = self.guesses, "target found");
            return Ok(GuessOutcome::Won {
                word,
                guesses: self.guesses,
            });
        }

        let rankings = self.rankings().await?;
        let guess = evaluate_guess(&word, rankings.as_slice())?;
        let feedback = classify(guess.rank, guess.total_words)?;

        self.guesses += 1;
        self.history.push(guess.clone());
        Ok(GuessOutcome::Ranked { guess, feedback })
    }

    /// End the game and reveal the target.
    pub fn give_up(&mut self) -> GameResult<&str> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }
        let remaining = self.give_up_remaining();
        if remaining > 0 {
            return Err(GameError::GiveUpLocked { remaining });
        }
        self.status = GameStatus::GaveUp;
        tracing::debug!(guesses = self.guesses, "gave up");
        Ok(&self.target)
    }

    /// Guesses still needed before giving up is allowed.
    pub fn give_up_remaining(&self) -> usize {
        self.options.give_up_after.saturating_sub(self.guesses)
    }

    /// Ranked guesses in submission order.
    pub fn history(&self) -> &[GuessData] {
        &self.history
    }

    /// Ranked guesses, closest first.
    pub fn history_by_rank(&self) -> Vec<&GuessData> {
        let mut sorted: Vec<&GuessData> = self.history.iter().collect();
        sorted.sort_by_key(|g| g.rank);
        sorted
    }

    /// Whether `word` has already been guessed.
    pub fn has_guessed(&self, word: &str) -> bool {
        let word = normalize(word);
        self.history.iter().any(|g| g.word == word)
    }

    /// Accepted guesses, including a winning one.
    pub const fn guess_count(&self) -> usize {
        self.guesses
    }

    /// Current status.
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// The target word.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of letters in the target.
    pub fn target_len(&self) -> usize {
        self.target.chars().count()
    }

    /// The vocabulary this game draws from.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Overview of the game; the target is included only once it is over.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            status: self.status,
            guesses: self.guesses,
            target_len: self.target_len(),
            total_words: self.rankings.get().map(|r| r.len()),
            target: (self.status != GameStatus::InProgress).then(|| self.target.clone()),
        }
    }
}
