//! Embeddings.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{
    EmbeddingRequest, EmbeddingResponse, EnhancedEmbeddingRequest, EnhancedEmbeddingResponse,
};
use tracing::{debug, instrument, warn};

/// Texts per request when [`EmbeddingsService::batch`] is given a size of zero.
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;

/// Embedding endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddingsService<'a> {
    client: &'a Client,
}

impl<'a> EmbeddingsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Embed texts.
    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.input.len()))]
    pub async fn create(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        self.client.post(&["embeddings"], request).await
    }

    /// Embed texts with normalization and truncation controls.
    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.input.len()))]
    pub async fn create_enhanced(
        &self,
        request: &EnhancedEmbeddingRequest,
    ) -> Result<EnhancedEmbeddingResponse> {
        self.client.post(&["embeddings", "enhanced"], request).await
    }

    /// Cosine similarity of two texts.
    #[instrument(skip(self, first, second))]
    pub async fn similarity(&self, first: &str, second: &str, model: &str) -> Result<f32> {
        let request = EnhancedEmbeddingRequest {
            model: model.to_string(),
            input: vec![first.to_string(), second.to_string()],
            normalize: true,
            ..EnhancedEmbeddingRequest::default()
        };
        let mut response = self.create_enhanced(&request).await?;

        if response.data.len() != 2 {
            return Err(Error::parse_error(format!(
                "expected 2 embeddings, got {}",
                response.data.len()
            )));
        }
        response.data.sort_by_key(|d| d.index);

        cosine_similarity(&response.data[0].embedding, &response.data[1].embedding)
    }

    /// Embed many texts, `batch_size` per request, in input order.
    ///
    /// A `batch_size` of zero uses [`DEFAULT_EMBEDDING_BATCH_SIZE`]. Stops
    /// at the first failed request.
    #[instrument(skip(self, texts), fields(texts = texts.len()))]
    pub async fn batch(
        &self,
        texts: &[String],
        model: &str,
        batch_size: usize,
    ) -> Result<Vec<Vec<f32>>> {
        let batch_size = if batch_size == 0 {
            DEFAULT_EMBEDDING_BATCH_SIZE
        } else {
            batch_size
        };

        let mut embeddings = Vec::with_capacity(texts.len());
        for (index, chunk) in texts.chunks(batch_size).enumerate() {
            debug!(batch = index, size = chunk.len(), "Embedding batch");
            let request = EmbeddingRequest::new(model, chunk.to_vec());
            let response = self.create(&request).await.map_err(|e| {
                warn!(batch = index, error = %e, "Embedding batch failed");
                e
            })?;
            embeddings.extend(response.into_vectors());
        }

        Ok(embeddings)
    }
}

/// Cosine similarity of two vectors.
///
/// Zero vectors have a similarity of `0.0`; vectors of different lengths
/// are an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::invalid_request(format!(
            "embedding dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0_f32, 0.0_f32, 0.0_f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / denominator)
}
