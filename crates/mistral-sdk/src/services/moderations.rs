//! Content moderation.

use crate::client::Client;
use crate::error::Result;
use crate::types::{ChatModerationRequest, Message, ModerationRequest, ModerationResponse};
use tracing::instrument;

/// Moderation endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ModerationsService<'a> {
    client: &'a Client,
}

impl<'a> ModerationsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Moderate raw texts.
    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.input.len()))]
    pub async fn create(&self, request: &ModerationRequest) -> Result<ModerationResponse> {
        self.client.post(&["moderations"], request).await
    }

    /// Moderate a conversation.
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    pub async fn create_chat(
        &self,
        messages: Vec<Message>,
        model: &str,
    ) -> Result<ModerationResponse> {
        let request = ChatModerationRequest {
            input: messages,
            model: model.to_string(),
        };
        self.client.post(&["chat", "moderations"], &request).await
    }
}
