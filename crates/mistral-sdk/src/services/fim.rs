//! Fill-in-the-middle completion.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::streaming::FimStream;
use crate::types::{FimRequest, FimResponse};
use tracing::instrument;

const PATH: &[&str] = &["fim"];

/// FIM endpoints.
#[derive(Debug, Clone, Copy)]
pub struct FimService<'a> {
    client: &'a Client,
}

impl<'a> FimService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Complete the code between a prefix and a suffix.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: &FimRequest) -> Result<FimResponse> {
        if request.stream {
            return Err(Error::invalid_request(
                "stream is set; use create_stream for streaming requests",
            ));
        }
        self.client.post(PATH, request).await
    }

    /// Stream the completion.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create_stream(&self, request: &FimRequest) -> Result<FimStream> {
        let mut request = request.clone();
        request.stream = true;
        self.client.open_stream(PATH, &request).await
    }
}
