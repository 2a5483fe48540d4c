//! OpenAI-compatible embeddings endpoint.

use async_openai::{Client, config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs};
use async_trait::async_trait;

use crate::embedding::{Embedding, EmbeddingProvider};
use crate::error::{GameError, GameResult};

/// Embeds a batch through `POST /embeddings`, split into requests of at
/// most [`MAX_INPUTS_PER_REQUEST`] inputs.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: Option<u32>,
}

impl OpenAiProvider {
    /// Create a provider.
    ///
    /// `api_key` and `base_url` fall back to the client's own defaults
    /// (`OPENAI_API_KEY`, `https://api.openai.com/v1`) when `None`.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<&str>,
        base_url: Option<&str>,
        dimensions: Option<u32>,
    ) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }

        Self {
            client: Client::with_config(config),
            model: model.into(),
            dimensions,
        }
    }
}

/// Inputs the embeddings endpoint accepts in one request.
pub const MAX_INPUTS_PER_REQUEST: usize = 2048;

impl OpenAiProvider {
    /// Embed one request's worth of inputs, returning rows keyed by their
    /// position in the whole batch.
    async fn embed_chunk(
        &self,
        offset: usize,
        chunk: &[String],
    ) -> GameResult<Vec<(usize, Vec<f32>)>> {
        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(&self.model).input(chunk.to_vec());
        if let Some(dimensions) = self.dimensions {
            args.dimensions(dimensions);
        }
        let request = args.build().map_err(GameError::embedding)?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(GameError::embedding)?;
        tracing::debug!(offset, rows = response.data.len(), "embedded chunk");

        Ok(response
            .data
            .into_iter()
            .map(|row| (offset + row.index as usize, row.embedding))
            .collect())
    }
}

/// Order rows by batch position and check there is exactly one per input.
///
/// Rows may arrive out of order within and across requests; the index is
/// authoritative.
fn assemble_rows(
    mut rows: Vec<(usize, Vec<f32>)>,
    expected: usize,
    dimensions: Option<usize>,
) -> GameResult<Vec<Embedding>> {
    if rows.len() != expected {
        return Err(GameError::embedding(format!(
            "embedding count mismatch: expected {expected}, got {}",
            rows.len()
        )));
    }
    rows.sort_by_key(|(index, _)| *index);
    if let Some(position) = rows.iter().enumerate().position(|(i, (index, _))| i != *index) {
        return Err(GameError::embedding(format!(
            "missing embedding for input {position}"
        )));
    }

    let dimension = dimensions
        .or_else(|| rows.first().map(|(_, values)| values.len()))
        .unwrap_or_default();
    rows.into_iter()
        .map(|(_, values)| Embedding::with_dimension(values, dimension))
        .collect()
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    #[tracing::instrument(skip_all, fields(model = %self.model, inputs = inputs.len()))]
    async fn embed(&self, inputs: &[String]) -> GameResult<Vec<Embedding>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(inputs.len());
        for (i, chunk) in inputs.chunks(MAX_INPUTS_PER_REQUEST).enumerate() {
            rows.extend(self.embed_chunk(i * MAX_INPUTS_PER_REQUEST, chunk).await?);
        }

        assemble_rows(rows, inputs.len(), self.dimensions())
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions.map(|d| d as usize)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
