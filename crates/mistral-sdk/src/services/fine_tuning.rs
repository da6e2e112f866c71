//! Fine-tuning jobs.

use crate::client::Client;
use crate::error::Result;
use crate::types::{CreateFineTuningJobRequest, FineTuningJob, FineTuningJobList};
use reqwest::Method;
use tracing::instrument;

/// Fine-tuning endpoints.
#[derive(Debug, Clone, Copy)]
pub struct FineTuningService<'a> {
    client: &'a Client,
}

impl<'a> FineTuningService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Start a fine-tuning job.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: &CreateFineTuningJobRequest) -> Result<FineTuningJob> {
        self.client.post(&["fine_tuning", "jobs"], request).await
    }

    /// List fine-tuning jobs.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<FineTuningJobList> {
        self.client.get(&["fine_tuning", "jobs"]).await
    }

    /// Retrieve a fine-tuning job.
    #[instrument(skip(self))]
    pub async fn get(&self, job_id: &str) -> Result<FineTuningJob> {
        self.client.get(&["fine_tuning", "jobs", job_id]).await
    }

    /// Cancel a fine-tuning job and return its new state.
    #[instrument(skip(self))]
    pub async fn cancel(&self, job_id: &str) -> Result<FineTuningJob> {
        self.client
            .request_json::<_, ()>(Method::POST, &["fine_tuning", "jobs", job_id, "cancel"], None)
            .await
    }
}
