//! Batch jobs.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::poller::{BatchPoller, JobStatusFetcher, PollConfig, PollOutcome};
use crate::types::{BatchJob, BatchOptions, BatchRequest, ChatCompletionRequest, EmbeddingRequest};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

/// Batch endpoints.
#[derive(Debug, Clone, Copy)]
pub struct BatchService<'a> {
    client: &'a Client,
}

impl<'a> BatchService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Submit a batch job.
    #[instrument(skip(self, request), fields(model = %request.model, requests = request.requests.len()))]
    pub async fn create(&self, request: &BatchRequest) -> Result<BatchJob> {
        self.client.post(&["batch"], request).await
    }

    /// Retrieve the current snapshot of a batch job.
    #[instrument(skip(self))]
    pub async fn get(&self, batch_id: &str) -> Result<BatchJob> {
        self.client.get(&["batch", batch_id]).await
    }

    /// Cancel a batch job.
    #[instrument(skip(self))]
    pub async fn cancel(&self, batch_id: &str) -> Result<()> {
        self.client
            .request_empty::<()>(Method::POST, &["batch", batch_id, "cancel"], None)
            .await
    }

    /// Submit chat requests as one job.
    ///
    /// The job uses the model of the first request. Without options,
    /// [`BatchOptions::chat_defaults`] apply.
    #[instrument(skip(self, requests, options), fields(requests = requests.len()))]
    pub async fn create_chat(
        &self,
        requests: &[ChatCompletionRequest],
        options: Option<BatchOptions>,
    ) -> Result<BatchJob> {
        let first = requests
            .first()
            .ok_or_else(|| Error::invalid_request("a batch needs at least one request"))?;

        let batch = BatchRequest {
            requests: requests
                .iter()
                .map(serde_json::to_value)
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| Error::invalid_request(format!("Failed to encode request: {e}")))?,
            model: first.model.clone(),
            options: options.unwrap_or_else(BatchOptions::chat_defaults),
        };

        self.create(&batch).await
    }

    /// Submit one embedding request per text as one job.
    ///
    /// Without options, [`BatchOptions::embedding_defaults`] apply.
    #[instrument(skip(self, texts, options), fields(texts = texts.len()))]
    pub async fn create_embeddings(
        &self,
        texts: &[String],
        model: &str,
        options: Option<BatchOptions>,
    ) -> Result<BatchJob> {
        let requests = texts
            .iter()
            .map(|text| serde_json::to_value(EmbeddingRequest::new(model, vec![text.clone()])))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::invalid_request(format!("Failed to encode request: {e}")))?;

        let batch = BatchRequest {
            requests,
            model: model.to_string(),
            options: options.unwrap_or_else(BatchOptions::embedding_defaults),
        };

        self.create(&batch).await
    }

    /// Poll a job at the client's poll interval until every sub-request resolved.
    pub async fn wait_for_completion(&self, batch_id: &str) -> Result<BatchJob> {
        let config = PollConfig::new().with_interval(self.client.config().poll_interval());
        match self.wait_for_completion_with(batch_id, config).await? {
            PollOutcome::Completed(job) => Ok(job),
            // No cancel signal was configured.
            PollOutcome::Cancelled { reason } => Err(Error::invalid_request(reason)),
        }
    }

    /// Poll a job with an explicit interval and cancellation signal.
    pub async fn wait_for_completion_with(
        &self,
        batch_id: &str,
        config: PollConfig,
    ) -> Result<PollOutcome> {
        BatchPoller::new(*self, config)
            .wait_for_completion(batch_id)
            .await
    }
}

#[async_trait]
impl JobStatusFetcher for BatchService<'_> {
    async fn fetch(&self, job_id: &str) -> Result<BatchJob> {
        self.get(job_id).await
    }
}
