//! Model metadata types.

use serde::{Deserialize, Serialize};

/// A model available to the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier.
    pub id: String,
    /// Object type (always "model").
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Owning organization.
    #[serde(default)]
    pub owned_by: String,
    /// Permissions granted on the model.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Root model.
    #[serde(default)]
    pub root: Option<String>,
    /// Parent model for fine-tuned models.
    #[serde(default)]
    pub parent: Option<String>,
}

/// A list of models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    /// Object type (always "list").
    #[serde(default)]
    pub object: String,
    /// Models.
    pub data: Vec<Model>,
}

/// A capability a model may have.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCapability {
    /// Capability name, e.g. `function_calling`.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the model offers it.
    #[serde(default)]
    pub available: bool,
}

/// One performance measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPerformance {
    /// Metric name.
    pub metric: String,
    /// Measured value.
    pub value: f32,
    /// Unit of the value.
    #[serde(default)]
    pub unit: String,
}

/// Per-token pricing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenCosts {
    /// Cost per input token.
    #[serde(default)]
    pub input: f32,
    /// Cost per output token.
    #[serde(default)]
    pub output: f32,
}

/// A model with its detailed description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedModel {
    /// Base model record.
    #[serde(flatten)]
    pub model: Model,
    /// Version string.
    #[serde(default)]
    pub version: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Capabilities.
    #[serde(default)]
    pub capabilities: Vec<ModelCapability>,
    /// Performance metrics.
    #[serde(default)]
    pub performance: Vec<ModelPerformance>,
    /// Context window.
    #[serde(default)]
    pub max_tokens: u32,
    /// Pricing.
    #[serde(default)]
    pub token_costs: TokenCosts,
}

impl EnhancedModel {
    /// Whether the named capability is available.
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.name == capability && c.available)
    }
}
