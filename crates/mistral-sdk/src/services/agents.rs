//! Agent chat.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::streaming::AgentStream;
use crate::types::{AgentRequest, AgentResponse};
use tracing::instrument;

const PATH: &[&str] = &["agents", "chat"];

/// Agent endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AgentsService<'a> {
    client: &'a Client,
}

impl<'a> AgentsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run an agent turn.
    #[instrument(skip(self, request), fields(model = %request.model, tools = request.tools.len()))]
    pub async fn create(&self, request: &AgentRequest) -> Result<AgentResponse> {
        if request.stream {
            return Err(Error::invalid_request(
                "stream is set; use create_stream for streaming requests",
            ));
        }
        self.client.post(PATH, request).await
    }

    /// Run an agent turn, streaming its output.
    #[instrument(skip(self, request), fields(model = %request.model, tools = request.tools.len()))]
    pub async fn create_stream(&self, request: &AgentRequest) -> Result<AgentStream> {
        let mut request = request.clone();
        request.stream = true;
        self.client.open_stream(PATH, &request).await
    }
}
