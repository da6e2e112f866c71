//! Fill-in-the-middle types.

use super::common::{ContentDelta, Usage};
use serde::{Deserialize, Serialize};

/// Request to complete code between a prefix and a suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FimRequest {
    /// Code model, e.g. `codestral-latest`.
    pub model: String,
    /// Text before the gap.
    pub prefix: String,
    /// Text after the gap.
    #[serde(default)]
    pub suffix: String,
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Stream the response.
    #[serde(default)]
    pub stream: bool,
    /// Stop sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

impl FimRequest {
    /// Create a request.
    pub fn new(model: impl Into<String>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            stream: false,
            stop: Vec::new(),
        }
    }
}

/// Response from the FIM endpoint, or one streamed fragment of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FimResponse {
    /// Response identifier.
    #[serde(default)]
    pub id: String,
    /// Object type.
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Model used.
    #[serde(default)]
    pub model: String,
    /// Completions.
    #[serde(default)]
    pub choices: Vec<FimChoice>,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

impl FimResponse {
    /// Text of the first choice.
    pub fn text(&self) -> &str {
        self.choices.first().map_or("", |c| c.text.as_str())
    }
}

impl ContentDelta for FimResponse {
    fn content_delta(&self) -> &str {
        self.text()
    }
}

/// One completion of the gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FimChoice {
    /// Index of this choice.
    #[serde(default)]
    pub index: u32,
    /// Generated text.
    #[serde(default)]
    pub text: String,
    /// Reason for completion.
    #[serde(default)]
    pub finish_reason: Option<String>,
}
