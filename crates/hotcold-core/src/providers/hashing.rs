//! Offline embedding by signed feature hashing of character trigrams.
//!
//! Words are padded with boundary markers (`^word$`) and split into
//! trigrams; each trigram is hashed to a bucket and a sign. Words that share
//! spelling land close together. There is no semantics here, but the output
//! is deterministic and needs no network, which makes it the provider for
//! offline play and tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::embedding::{Embedding, EmbeddingProvider};
use crate::error::{GameError, GameResult};

/// Default vector size.
pub const DEFAULT_DIMENSIONS: usize = 256;

/// Deterministic trigram-hashing embedder.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    /// Create a provider producing vectors of `dimensions` components.
    pub fn new(dimensions: usize) -> GameResult<Self> {
        if dimensions == 0 {
            return Err(GameError::embedding("hashing provider needs at least one dimension"));
        }
        Ok(Self { dimensions })
    }

    /// Embed a single string.
    pub fn embed_one(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0_f32; self.dimensions];
        let padded: Vec<char> = std::iter::once('^')
            .chain(text.trim().to_lowercase().chars())
            .chain(std::iter::once('$'))
            .collect();

        for gram in padded.windows(3) {
            let mut hasher = DefaultHasher::new();
            gram.hash(&mut hasher);
            let hash = hasher.finish();
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        l2_normalize(&mut vector);
        Embedding::new(vector)
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, inputs: &[String]) -> GameResult<Vec<Embedding>> {
        Ok(inputs.iter().map(|input| self.embed_one(input)).collect())
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.dimensions)
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-12 {
        for x in vec.iter_mut() {
            *x /= norm;
        }
    }
}
