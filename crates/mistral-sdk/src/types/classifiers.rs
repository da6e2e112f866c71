//! Classifier types.

use super::common::Usage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to classify texts against a label set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierRequest {
    /// Classifier model.
    pub model: String,
    /// Texts to classify.
    pub input: Vec<String>,
    /// Candidate labels.
    pub labels: Vec<String>,
    /// Allow more than one label per input.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi_label: bool,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ClassifierRequest {
    /// Create a single-label request.
    pub fn new(model: impl Into<String>, input: Vec<String>, labels: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            labels,
            multi_label: false,
            temperature: None,
        }
    }
}

/// Response from the classifier endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierResponse {
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
    /// One result per input.
    pub results: Vec<ClassifierResult>,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

/// Classification of one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// The classified text.
    #[serde(default)]
    pub input: String,
    /// Assigned labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Score per label.
    #[serde(default)]
    pub scores: HashMap<String, f32>,
    /// Confidence of the assignment.
    #[serde(default)]
    pub confidence: f32,
}

impl ClassifierResult {
    /// Label with the highest score.
    pub fn top_label(&self) -> Option<&str> {
        self.scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, _)| label.as_str())
    }
}
