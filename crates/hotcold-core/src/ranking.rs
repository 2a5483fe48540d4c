//! Ranking every vocabulary word by similarity to a target.
//!
//! The whole vocabulary is embedded in one provider call, with the target
//! first. Each remaining word's similarity to the target is its cosine
//! similarity clamped to `[0, 1]`. Words are ordered by descending similarity,
//! ties broken alphabetically, and ranked from 1.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingProvider;
use crate::error::{GameError, GameResult};
use crate::vocabulary::normalize;

/// One word's place in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordRanking {
    /// The vocabulary word.
    pub word: String,
    /// Cosine similarity to the target, clamped to `[0, 1]`.
    pub similarity: f64,
    /// 1-based position; 1 is closest to the target.
    pub rank: usize,
}

/// Immutable ranking of a vocabulary against one target, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Rankings(Vec<WordRanking>);

impl Rankings {
    /// Number of ranked words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, WordRanking> {
        self.0.iter()
    }

    /// Entries in rank order, as a slice.
    pub fn as_slice(&self) -> &[WordRanking] {
        &self.0
    }

    /// The `n` closest words (fewer if the ranking is shorter).
    pub fn top(&self, n: usize) -> &[WordRanking] {
        &self.0[..n.min(self.0.len())]
    }
}

impl<'a> IntoIterator for &'a Rankings {
    type Item = &'a WordRanking;
    type IntoIter = std::slice::Iter<'a, WordRanking>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Rank `vocabulary` by similarity to `target`.
///
/// The target is excluded from the result (case-insensitively) and need not
/// be a vocabulary word. Fails with [`GameError::EmbeddingFailure`] when the
/// provider fails or returns the wrong number of vectors.
#[tracing::instrument(
    skip(vocabulary, provider),
    fields(provider = provider.name(), vocabulary = vocabulary.len())
)]
pub async fn compute_rankings(
    target: &str,
    vocabulary: &[String],
    provider: &dyn EmbeddingProvider,
) -> GameResult<Rankings> {
    let target = normalize(target);
    let candidates: Vec<&String> = vocabulary
        .iter()
        .filter(|word| word.to_lowercase() != target)
        .collect();

    let inputs: Vec<String> = std::iter::once(target.clone())
        .chain(candidates.iter().map(|word| word.to_lowercase()))
        .collect();

    let embeddings = provider.embed(&inputs).await?;
    if embeddings.len() != inputs.len() {
        return Err(GameError::embedding(format!(
            "provider returned {} vectors for {} inputs",
            embeddings.len(),
            inputs.len()
        )));
    }

    let mut vectors = embeddings.into_iter();
    let target_vector = vectors
        .next()
        .ok_or_else(|| GameError::embedding("provider returned no target vector"))?;

    let mut ranked = candidates
        .into_iter()
        .zip(vectors)
        .map(|(word, vector)| {
            let similarity = target_vector.cosine_similarity(&vector)?.clamp(0.0, 1.0);
            Ok(WordRanking {
                word: word.clone(),
                similarity,
                rank: 0,
            })
        })
        .collect::<GameResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.word.cmp(&b.word))
    });
    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position + 1;
    }

    tracing::debug!(
        ranked = ranked.len(),
        closest = ranked.first().map(|r| r.word.as_str()),
        "rankings computed"
    );
    Ok(Rankings(ranked))
}
