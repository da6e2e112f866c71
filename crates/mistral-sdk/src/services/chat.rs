//! Chat completions.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::streaming::ChatStream;
use crate::types::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, Message,
    ResponseFormat, Tool,
};
use tracing::instrument;

const PATH: &[&str] = &["chat", "completions"];

/// Chat completion endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ChatService<'a> {
    client: &'a Client,
}

impl<'a> ChatService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Send a chat completion request.
    ///
    /// Streaming requests must go through [`create_stream`](Self::create_stream).
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        if request.stream {
            return Err(Error::invalid_request(
                "stream is set; use create_stream for streaming requests",
            ));
        }
        self.client.post(PATH, request).await
    }

    /// Send a streaming chat completion request.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create_stream(&self, request: &ChatCompletionRequest) -> Result<ChatStream> {
        let mut request = request.clone();
        request.stream = true;
        self.client.open_stream(PATH, &request).await
    }

    /// Start a fluent chat request.
    ///
    /// ```rust,no_run
    /// # use mistral_sdk::Client;
    /// # async fn example(client: &Client) -> Result<(), mistral_sdk::Error> {
    /// let response = client
    ///     .chat()
    ///     .builder()
    ///     .model("mistral-large-latest")
    ///     .system_message("You are helpful")
    ///     .user_message("Hello!")
    ///     .temperature(0.7)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(&self) -> ChatBuilder<'a> {
        ChatBuilder {
            client: self.client,
            builder: ChatCompletionRequestBuilder::new(),
        }
    }
}

/// Fluent builder that sends the request it builds.
#[derive(Debug)]
pub struct ChatBuilder<'a> {
    client: &'a Client,
    builder: ChatCompletionRequestBuilder,
}

impl ChatBuilder<'_> {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.builder = self.builder.model(model);
        self
    }

    /// Add a message.
    pub fn message(mut self, message: Message) -> Self {
        self.builder = self.builder.message(message);
        self
    }

    /// Set the system message.
    pub fn system_message(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.system_message(content);
        self
    }

    /// Add a user message.
    pub fn user_message(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.user_message(content);
        self
    }

    /// Add an assistant message.
    pub fn assistant_message(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.assistant_message(content);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.builder = self.builder.temperature(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.builder = self.builder.max_tokens(max_tokens);
        self
    }

    /// Set top_p.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.builder = self.builder.top_p(top_p);
        self
    }

    /// Add a stop sequence.
    pub fn stop(mut self, sequence: impl Into<String>) -> Self {
        self.builder = self.builder.stop(sequence);
        self
    }

    /// Set the random seed.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.builder = self.builder.random_seed(seed);
        self
    }

    /// Offer a tool to the model.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.builder = self.builder.tool(tool);
        self
    }

    /// Set the output format.
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.builder = self.builder.response_format(format);
        self
    }

    /// Enable the safety prompt.
    pub fn safe_prompt(mut self, enabled: bool) -> Self {
        self.builder = self.builder.safe_prompt(enabled);
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<ChatCompletionResponse> {
        let request = self.builder.build()?;
        ChatService::new(self.client).create(&request).await
    }

    /// Send as a streaming request.
    pub async fn stream(self) -> Result<ChatStream> {
        let request = self.builder.streaming(true).build()?;
        ChatService::new(self.client).create_stream(&request).await
    }
}
