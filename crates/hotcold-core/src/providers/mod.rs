//! Embedding provider implementations.
//!
//! - [`OpenAiProvider`]: OpenAI-compatible HTTP endpoint (the real model)
//! - [`HashingProvider`]: deterministic offline trigram hashing
//! - [`TableProvider`]: precomputed vectors from a JSON file
//!
//! [`create_provider`] picks one from [`Config`].

mod hashing;
mod openai;
mod table;

use std::sync::Arc;

pub use hashing::{DEFAULT_DIMENSIONS, HashingProvider};
pub use openai::{MAX_INPUTS_PER_REQUEST, OpenAiProvider};
pub use table::TableProvider;

use crate::config::{Config, EmbeddingBackend};
use crate::embedding::EmbeddingProvider;
use crate::error::{GameError, GameResult};

/// Build the provider selected by `config.embedding_provider`.
#[tracing::instrument(skip(config), fields(provider = %config.embedding_provider))]
pub fn create_provider(config: &Config) -> GameResult<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.embedding_provider {
        EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
            config.embedding_model(),
            config.openai_api_key.as_deref(),
            config.embedding_base_url.as_deref(),
            config.embedding_dimensions,
        )),
        EmbeddingBackend::Hashing => {
            let dimensions = config
                .embedding_dimensions
                .map_or(DEFAULT_DIMENSIONS, |d| d as usize);
            Arc::new(HashingProvider::new(dimensions)?)
        }
        EmbeddingBackend::Table => {
            let path = config.embedding_table.as_deref().ok_or_else(|| {
                GameError::embedding("the table provider needs `embedding_table` to be set")
            })?;
            Arc::new(TableProvider::from_file(path)?)
        }
    };
    tracing::debug!(name = provider.name(), "embedding provider ready");
    Ok(provider)
}
