//! Agent chat types.

use super::common::{ContentDelta, Message, Usage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A function an agent can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentFunction {
    /// Function name.
    pub name: String,
    /// What the function does.
    #[serde(default)]
    pub description: String,
    /// JSON schema of the parameters.
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

/// A tool available to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTool {
    /// Tool type, always `function`.
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function definition.
    pub function: AgentFunction,
}

/// Request for an agent chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Model driving the agent.
    pub model: String,
    /// Tools the agent may use.
    #[serde(default)]
    pub tools: Vec<AgentTool>,
    /// Conversation so far.
    pub messages: Vec<Message>,
    /// Upper bound on tool actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_actions: Option<u32>,
    /// Stream the response.
    #[serde(default)]
    pub stream: bool,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Stop sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

impl AgentRequest {
    /// Create a request with no tools.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            tools: Vec::new(),
            messages,
            max_actions: None,
            stream: false,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: Vec::new(),
        }
    }
}

/// An action taken by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAction {
    /// Tool invoked.
    pub tool: String,
    /// Tool input.
    #[serde(default)]
    pub input: HashMap<String, serde_json::Value>,
    /// Reasoning behind the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    /// Tool response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Response from the agent chat endpoint, or one streamed fragment of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Response identifier.
    #[serde(default)]
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
    /// Actions taken.
    #[serde(default)]
    pub actions: Vec<AgentAction>,
    /// Messages produced.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

impl AgentResponse {
    /// The last message produced, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl ContentDelta for AgentResponse {
    fn content_delta(&self) -> &str {
        self.last_message().map_or("", |m| m.content.as_str())
    }
}
