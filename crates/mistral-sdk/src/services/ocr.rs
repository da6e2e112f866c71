//! Document OCR.

use crate::client::Client;
use crate::error::Result;
use crate::types::{OcrJob, OcrRequest, OcrResponse};
use tracing::instrument;

/// OCR endpoints.
#[derive(Debug, Clone, Copy)]
pub struct OcrService<'a> {
    client: &'a Client,
}

impl<'a> OcrService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Extract text from files and wait for the result.
    #[instrument(skip(self, request), fields(model = %request.model, files = request.files.len()))]
    pub async fn create(&self, request: &OcrRequest) -> Result<OcrResponse> {
        self.client.post(&["ocr"], request).await
    }

    /// Submit an OCR job and return its identifier.
    #[instrument(skip(self, request), fields(model = %request.model, files = request.files.len()))]
    pub async fn create_async(&self, request: &OcrRequest) -> Result<String> {
        let job: OcrJob = self.client.post(&["ocr", "async"], request).await?;
        Ok(job.job_id)
    }

    /// Retrieve the result of an OCR job.
    #[instrument(skip(self))]
    pub async fn get_async_result(&self, job_id: &str) -> Result<OcrResponse> {
        self.client.get(&["ocr", "async", job_id]).await
    }
}
