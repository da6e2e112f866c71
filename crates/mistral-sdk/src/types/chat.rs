//! Chat completion types.

use super::common::{ContentDelta, Message, Tool, ToolCall, Usage};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Structured output mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// `text` or `json_object`.
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Plain text output.
    pub fn text() -> Self {
        Self {
            format_type: "text".to_string(),
        }
    }

    /// Force the model to emit a JSON object.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request for chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model to use for completion.
    pub model: String,
    /// Messages in the conversation.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Stream the response.
    #[serde(default)]
    pub stream: bool,
    /// Stop sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    /// Seed for deterministic sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    /// Tools the model may call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    /// `auto`, `any` or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    /// Output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Prepend the provider's safety prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_prompt: Option<bool>,
}

impl ChatCompletionRequest {
    /// Create a new chat request.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stream: false,
            stop: Vec::new(),
            random_seed: None,
            tools: Vec::new(),
            tool_choice: None,
            response_format: None,
            safe_prompt: None,
        }
    }

    /// Create a builder for this request.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::new()
    }
}

/// Builder for chat requests.
#[derive(Debug, Default)]
pub struct ChatCompletionRequestBuilder {
    model: Option<String>,
    messages: Vec<Message>,
    system_message: Option<String>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    max_tokens: Option<u32>,
    stream: bool,
    stop: Vec<String>,
    random_seed: Option<u64>,
    tools: Vec<Tool>,
    tool_choice: Option<String>,
    response_format: Option<ResponseFormat>,
    safe_prompt: Option<bool>,
}

impl ChatCompletionRequestBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages to the conversation.
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the system message.
    pub fn system_message(mut self, content: impl Into<String>) -> Self {
        self.system_message = Some(content.into());
        self
    }

    /// Add a user message.
    pub fn user_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Add an assistant message.
    pub fn assistant_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the top-p sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Add a stop sequence.
    pub fn stop(mut self, sequence: impl Into<String>) -> Self {
        self.stop.push(sequence.into());
        self
    }

    /// Set the seed for deterministic sampling.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Offer a tool to the model.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set the tool choice mode.
    pub fn tool_choice(mut self, choice: impl Into<String>) -> Self {
        self.tool_choice = Some(choice.into());
        self
    }

    /// Set the response format.
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Toggle the safety prompt.
    pub fn safe_prompt(mut self, enabled: bool) -> Self {
        self.safe_prompt = Some(enabled);
        self
    }

    /// Enable streaming.
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Build the chat request.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or out of range.
    pub fn build(self) -> Result<ChatCompletionRequest, Error> {
        let model = self
            .model
            .ok_or_else(|| Error::invalid_request("model is required"))?;

        if self.messages.is_empty() && self.system_message.is_none() {
            return Err(Error::invalid_request("at least one message is required"));
        }

        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(system) = self.system_message {
            messages.push(Message::system(system));
        }
        messages.extend(self.messages);

        if let Some(temp) = self.temperature {
            if !(0.0..=1.5).contains(&temp) {
                return Err(Error::invalid_request(
                    "temperature must be between 0.0 and 1.5",
                ));
            }
        }

        if let Some(top_p) = self.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(Error::invalid_request("top_p must be between 0.0 and 1.0"));
            }
        }

        Ok(ChatCompletionRequest {
            model,
            messages,
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: self.stream,
            stop: self.stop,
            random_seed: self.random_seed,
            tools: self.tools,
            tool_choice: self.tool_choice,
            response_format: self.response_format,
            safe_prompt: self.safe_prompt,
        })
    }
}

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique identifier for this completion.
    pub id: String,
    /// Object type (always "chat.completion").
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of when the completion was created.
    #[serde(default)]
    pub created: i64,
    /// Model used for the completion.
    pub model: String,
    /// List of completion choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Usage,
}

impl ChatCompletionResponse {
    /// Get the content of the first choice.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map_or("", |c| c.message.content.as_str())
    }

    /// Tool calls requested in the first choice.
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.choices
            .first()
            .and_then(|c| c.message.tool_calls.as_deref())
            .unwrap_or_default()
    }

    /// Get the finish reason of the first choice.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }

    /// Check if the response was truncated due to length.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason() == Some("length")
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice.
    pub index: u32,
    /// The generated message.
    pub message: Message,
    /// Reason for completion.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One fragment of a streamed chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Completion identifier, shared by all chunks of a response.
    pub id: String,
    /// Object type (always "chat.completion.chunk").
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of when the chunk was created.
    #[serde(default)]
    pub created: i64,
    /// Model used for the completion.
    #[serde(default)]
    pub model: String,
    /// Choice deltas.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    /// Usage, present on the final chunk only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionChunk {
    /// Get the content delta from the first choice.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .unwrap_or("")
    }

    /// Get the finish reason if present.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }

    /// Check if this is the final chunk.
    pub fn is_final(&self) -> bool {
        self.finish_reason().is_some()
    }
}

impl ContentDelta for ChatCompletionChunk {
    fn content_delta(&self) -> &str {
        self.content()
    }
}

/// A choice in a streamed chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Index of this choice.
    pub index: u32,
    /// The delta content.
    #[serde(default)]
    pub delta: Delta,
    /// Reason for completion (only in final chunk).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delta {
    /// Role of the message (only in first chunk).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls (streaming).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}
