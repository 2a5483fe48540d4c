//! Core library for Hot or Cold.
//!
//! A target word is drawn from a [`Vocabulary`]; every other word is ranked
//! by the cosine similarity of its embedding to the target's. Players guess
//! words and learn each guess's rank and temperature.
//!
//! # Modules
//!
//! - [`embedding`] / [`providers`] - the embedding seam and its implementations
//! - [`model`] - lazily loaded, shared provider handle
//! - [`similarity`] - cosine similarity
//! - [`ranking`] - ranking a vocabulary against a target
//! - [`guess`] - looking a guess up in a ranking
//! - [`feedback`] - rank to temperature tier
//! - [`validate`] - raw input checks
//! - [`vocabulary`] - word lists
//! - [`game`] - a game session tying the above together
//! - [`config`] - configuration loading and management
//! - [`error`] - error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use hotcold_core::{ConfigLoader, GameOptions, GameSession, ModelCache, Vocabulary};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let (config, _sources) = ConfigLoader::new().load()?;
//! let model = Arc::new(ModelCache::from_config(config.clone()));
//! let mut game = GameSession::new(Vocabulary::builtin(), model, GameOptions::from(&config));
//!
//! let outcome = game.submit("ocean").await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod embedding;
pub mod error;
pub mod feedback;
pub mod game;
pub mod guess;
pub mod model;
pub mod providers;
pub mod ranking;
pub mod similarity;
pub mod validate;
pub mod vocabulary;

pub use config::{Config, ConfigLoader, ConfigSources, EmbeddingBackend, LogLevel};
pub use embedding::{Embedding, EmbeddingProvider};
pub use error::{ConfigError, ConfigResult, GameError, GameResult, ValidationError};
pub use feedback::{Feedback, Tier, classify};
pub use game::{GameOptions, GameSession, GameStatus, GameSummary, GuessOutcome};
pub use guess::{GuessData, evaluate_guess};
pub use model::{ModelCache, ModelState};
pub use ranking::{Rankings, WordRanking, compute_rankings};
pub use similarity::cosine_similarity;
pub use validate::validate_guess;
pub use vocabulary::Vocabulary;
