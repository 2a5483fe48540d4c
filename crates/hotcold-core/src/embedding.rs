//! Embedding vectors and the provider seam.
//!
//! An [`EmbeddingProvider`] turns a batch of strings into one [`Embedding`]
//! per string, positionally aligned with the input. The ranking engine makes
//! exactly one `embed` call per game, so implementations should treat the
//! whole vocabulary as a single batch.

use async_trait::async_trait;

use crate::error::{GameError, GameResult};
use crate::similarity;

/// A fixed-dimension embedding vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    /// Wrap a vector; its length becomes the dimension.
    pub const fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Wrap a vector, requiring it to have exactly `dimension` components.
    pub fn with_dimension(values: Vec<f32>, dimension: usize) -> GameResult<Self> {
        if values.len() != dimension {
            return Err(GameError::DimensionMismatch {
                expected: dimension,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// The raw components.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Cosine similarity with another embedding of the same dimension.
    pub fn cosine_similarity(&self, other: &Self) -> GameResult<f64> {
        similarity::cosine_similarity(&self.values, &other.values)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

/// Source of embeddings for the ranking engine.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed every input in one batch, returning vectors in input order.
    async fn embed(&self, inputs: &[String]) -> GameResult<Vec<Embedding>>;

    /// Output dimension, when the provider knows it up front.
    fn dimensions(&self) -> Option<usize>;

    /// Provider name for logging and `info` output.
    fn name(&self) -> &str;
}
