//! Model catalogue.

use crate::client::Client;
use crate::error::Result;
use crate::types::{EnhancedModel, Model, ModelCapability, ModelList, ModelPerformance};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Model endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ModelsService<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct Versions {
    #[serde(default)]
    versions: Vec<EnhancedModel>,
}

#[derive(Deserialize)]
struct Capabilities {
    #[serde(default)]
    capabilities: Vec<ModelCapability>,
}

#[derive(Deserialize)]
struct Metrics {
    #[serde(default)]
    metrics: Vec<ModelPerformance>,
}

#[derive(Serialize)]
struct TokenizeRequest<'t> {
    text: &'t str,
}

#[derive(Deserialize)]
struct TokenCount {
    token_count: u64,
}

impl<'a> ModelsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List available models.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<ModelList> {
        self.client.get(&["models"]).await
    }

    /// Retrieve a model.
    #[instrument(skip(self))]
    pub async fn get(&self, model_id: &str) -> Result<Model> {
        self.client.get(&["models", model_id]).await
    }

    /// Retrieve a model with capabilities, performance and pricing.
    #[instrument(skip(self))]
    pub async fn get_enhanced(&self, model_id: &str) -> Result<EnhancedModel> {
        self.client.get(&["models", model_id, "enhanced"]).await
    }

    /// List the versions of a model.
    #[instrument(skip(self))]
    pub async fn list_versions(&self, model_id: &str) -> Result<Vec<EnhancedModel>> {
        let response: Versions = self.client.get(&["models", model_id, "versions"]).await?;
        Ok(response.versions)
    }

    /// Capabilities of a model.
    #[instrument(skip(self))]
    pub async fn capabilities(&self, model_id: &str) -> Result<Vec<ModelCapability>> {
        let response: Capabilities = self
            .client
            .get(&["models", model_id, "capabilities"])
            .await?;
        Ok(response.capabilities)
    }

    /// Performance metrics of a model.
    #[instrument(skip(self))]
    pub async fn performance(&self, model_id: &str) -> Result<Vec<ModelPerformance>> {
        let response: Metrics = self
            .client
            .get(&["models", model_id, "performance"])
            .await?;
        Ok(response.metrics)
    }

    /// Count the tokens a text would use with a model.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn estimate_tokens(&self, model_id: &str, text: &str) -> Result<u64> {
        let response: TokenCount = self
            .client
            .post(&["models", model_id, "tokenize"], &TokenizeRequest { text })
            .await?;
        Ok(response.token_count)
    }
}
