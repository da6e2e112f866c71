//! Embedding types.

use super::common::Usage;
use serde::{Deserialize, Serialize};

/// Request to embed one or more inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Embedding model.
    pub model: String,
    /// Texts to embed.
    pub input: Vec<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
        }
    }
}

/// Response from the embeddings endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Response identifier.
    #[serde(default)]
    pub id: String,
    /// Object type (always "list").
    #[serde(default)]
    pub object: String,
    /// Model used.
    #[serde(default)]
    pub model: String,
    /// One entry per input, in input order.
    pub data: Vec<EmbeddingData>,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

impl EmbeddingResponse {
    /// The vectors ordered by their input index.
    pub fn into_vectors(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|d| d.index);
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}

/// A single embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Object type (always "embedding").
    #[serde(default)]
    pub object: String,
    /// The vector.
    pub embedding: Vec<f32>,
    /// Position of the corresponding input.
    #[serde(default)]
    pub index: usize,
}

/// Embedding request with output shaping options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedEmbeddingRequest {
    /// Embedding model.
    pub model: String,
    /// Texts to embed.
    pub input: Vec<String>,
    /// `float` or `base64`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    /// Return unit-length vectors.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub normalize: bool,
    /// Truncate inputs longer than the model context instead of failing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncate: bool,
}

/// Embedding response with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedEmbeddingResponse {
    /// Object type.
    #[serde(default)]
    pub object: String,
    /// Embeddings.
    pub data: Vec<EmbeddingData>,
    /// Model used.
    #[serde(default)]
    pub model: String,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
    /// Vector metadata.
    #[serde(default)]
    pub metadata: EmbeddingMetadata,
}

/// Metadata about returned embeddings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetadata {
    /// Vector dimensionality.
    #[serde(default)]
    pub dimensions: usize,
    /// Similarity metric the vectors are meant for, e.g. `cosine`.
    #[serde(default, rename = "similarity_metric")]
    pub similarity: String,
    /// Per-input truncation flags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub truncated: Vec<bool>,
}
