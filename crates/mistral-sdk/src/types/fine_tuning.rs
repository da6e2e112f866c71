//! Fine-tuning job types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to start a fine-tuning job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFineTuningJobRequest {
    /// Base model to fine-tune.
    pub model: String,
    /// IDs of uploaded training files.
    pub training_files: Vec<String>,
    /// IDs of uploaded validation files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_files: Vec<String>,
    /// Training hyperparameters, e.g. `learning_rate`, `training_steps`.
    #[serde(default)]
    pub hyperparameters: HashMap<String, serde_json::Value>,
}

impl CreateFineTuningJobRequest {
    /// Create a job request without hyperparameters.
    pub fn new(model: impl Into<String>, training_files: Vec<String>) -> Self {
        Self {
            model: model.into(),
            training_files,
            validation_files: Vec::new(),
            hyperparameters: HashMap::new(),
        }
    }

    /// Set a hyperparameter.
    pub fn hyperparameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.hyperparameters.insert(key.into(), value);
        self
    }
}

/// A fine-tuning job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineTuningJob {
    /// Job identifier.
    pub id: String,
    /// Base model.
    #[serde(default)]
    pub model: String,
    /// Job status, e.g. `QUEUED`, `RUNNING`, `SUCCESS`, `FAILED`, `CANCELLED`.
    #[serde(default)]
    pub status: String,
    /// Training files.
    #[serde(default)]
    pub training_files: Vec<String>,
    /// Validation files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_files: Vec<String>,
    /// Hyperparameters in effect.
    #[serde(default)]
    pub hyperparameters: HashMap<String, serde_json::Value>,
    /// Files produced by the job.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result_files: Vec<String>,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created_at: i64,
    /// Unix timestamp of completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<i64>,
}

impl FineTuningJob {
    /// Whether the job reached a final state.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status.to_ascii_uppercase().as_str(),
            "SUCCESS" | "SUCCEEDED" | "FAILED" | "CANCELLED"
        )
    }
}

/// A list of fine-tuning jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineTuningJobList {
    /// Object type (always "list").
    #[serde(default)]
    pub object: String,
    /// Jobs.
    pub data: Vec<FineTuningJob>,
}
