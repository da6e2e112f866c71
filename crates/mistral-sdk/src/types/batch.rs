//! Batch job types.

use serde::{Deserialize, Serialize};

/// Request to run many sub-requests as one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Sub-request bodies, any endpoint schema.
    pub requests: Vec<serde_json::Value>,
    /// Model used for every sub-request.
    pub model: String,
    /// Execution options.
    #[serde(default)]
    pub options: BatchOptions,
}

/// Batch execution options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Sub-requests processed in parallel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,
    /// Per sub-request retry policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryOptions>,
    /// Job timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Sub-requests per server-side chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,
}

impl BatchOptions {
    /// Defaults used for chat batches.
    pub fn chat_defaults() -> Self {
        Self {
            max_concurrency: Some(5),
            chunk_size: Some(100),
            ..Self::default()
        }
    }

    /// Defaults used for embedding batches.
    pub fn embedding_defaults() -> Self {
        Self {
            max_concurrency: Some(5),
            chunk_size: Some(1000),
            ..Self::default()
        }
    }
}

/// Server-side retry policy for sub-requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryOptions {
    /// Attempts per sub-request.
    pub max_attempts: u32,
    /// First delay in milliseconds.
    pub initial_delay: u32,
    /// Delay cap in milliseconds.
    pub max_delay: u32,
}

/// A batch job snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    /// Job identifier.
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
    /// Results received so far.
    #[serde(default)]
    pub results: Vec<BatchResult>,
    /// Aggregate counters.
    #[serde(default)]
    pub summary: BatchSummary,
}

impl BatchJob {
    /// Whether every sub-request resolved. See [`BatchSummary::is_complete`].
    pub fn is_complete(&self) -> bool {
        self.summary.is_complete()
    }
}

/// Outcome of one sub-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Position of the sub-request.
    pub index: usize,
    /// `succeeded` or `failed`.
    #[serde(default)]
    pub status: String,
    /// Response body on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    /// Error text on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Attempts made.
    #[serde(default)]
    pub attempts: u32,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration: u64,
}

/// Aggregate counters of a batch job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Sub-requests submitted.
    #[serde(default)]
    pub total_requests: u64,
    /// Sub-requests that succeeded.
    #[serde(default)]
    pub succeeded: u64,
    /// Sub-requests that failed.
    #[serde(default)]
    pub failed: u64,
    /// Total duration in milliseconds.
    #[serde(default)]
    pub total_duration: u64,
    /// Mean duration in milliseconds.
    #[serde(default)]
    pub average_duration: u64,
    /// Tokens consumed.
    #[serde(default)]
    pub tokens_used: u64,
    /// Cost of the job.
    #[serde(default)]
    pub total_cost: f32,
}

impl BatchSummary {
    /// Sub-requests that resolved either way.
    pub fn resolved(&self) -> u64 {
        self.succeeded.saturating_add(self.failed)
    }

    /// Whether every sub-request resolved.
    ///
    /// Counters that overshoot the total also count as complete, so that
    /// inconsistent server data cannot keep a poller waiting forever.
    pub fn is_complete(&self) -> bool {
        self.resolved() >= self.total_requests
    }
}
