//! Embeddings read from a precomputed JSON table.
//!
//! The file is a single JSON object mapping words to vectors:
//!
//! ```json
//! { "cat": [0.1, 0.9], "car": [0.2, 0.8] }
//! ```
//!
//! Keys are normalized (trimmed, lowercased) on load, so lookups are
//! case-insensitive. Every vector must have the same length.

use std::collections::HashMap;

use async_trait::async_trait;
use camino::Utf8Path;

use crate::embedding::{Embedding, EmbeddingProvider};
use crate::error::{GameError, GameResult};
use crate::vocabulary::normalize;

/// Provider backed by an in-memory word-to-vector table.
#[derive(Debug, Clone)]
pub struct TableProvider {
    table: HashMap<String, Embedding>,
    dimensions: usize,
}

impl TableProvider {
    /// Build a table from `(word, vector)` pairs.
    pub fn from_entries<I, S>(entries: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: AsRef<str>,
    {
        let mut table = HashMap::new();
        let mut dimensions = None;
        for (word, values) in entries {
            let expected = *dimensions.get_or_insert(values.len());
            let embedding = Embedding::with_dimension(values, expected)?;
            table.insert(normalize(word.as_ref()), embedding);
        }
        let dimensions = dimensions.ok_or_else(|| GameError::embedding("embedding table is empty"))?;
        Ok(Self { table, dimensions })
    }

    /// Load a JSON table from disk.
    #[tracing::instrument]
    pub fn from_file(path: &Utf8Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .map_err(|e| GameError::embedding(format!("failed to read {path}: {e}")))?;
        let raw: HashMap<String, Vec<f32>> = serde_json::from_str(&text)
            .map_err(|e| GameError::embedding(format!("invalid embedding table {path}: {e}")))?;
        let provider = Self::from_entries(raw)?;
        tracing::debug!(
            words = provider.table.len(),
            dimensions = provider.dimensions,
            "embedding table loaded"
        );
        Ok(provider)
    }
}

#[async_trait]
impl EmbeddingProvider for TableProvider {
    async fn embed(&self, inputs: &[String]) -> GameResult<Vec<Embedding>> {
        inputs
            .iter()
            .map(|input| {
                self.table
                    .get(&normalize(input))
                    .cloned()
                    .ok_or_else(|| GameError::embedding(format!("no vector for {input:?}")))
            })
            .collect()
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.dimensions)
    }

    fn name(&self) -> &str {
        "table"
    }
}
