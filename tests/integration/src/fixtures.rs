//! Test fixtures and sample data for integration tests

use mistral_sdk::{ChatCompletionRequest, Message};
use serde_json::{json, Value};

/// Model used throughout the tests.
pub const TEST_MODEL: &str = "mistral-small-latest";

/// Create a simple chat request for testing
pub fn simple_chat_request() -> ChatCompletionRequest {
    ChatCompletionRequest::new(TEST_MODEL, vec![Message::user("Hello, how are you?")])
}

/// Sample chat completion response
pub fn chat_response(content: &str) -> Value {
    json!({
        "id": "cmpl-e5cc70bb28c444948073e77776eb30ef",
        "object": "chat.completion",
        "created": 1_702_256_327,
        "model": TEST_MODEL,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 16, "completion_tokens": 34, "total_tokens": 50}
    })
}

/// Streamed chat chunk carrying one piece of content
pub fn chat_chunk(content: &str, finish_reason: Option<&str>) -> String {
    json!({
        "id": "cmpl-stream",
        "object": "chat.completion.chunk",
        "created": 1_702_256_327,
        "model": TEST_MODEL,
        "choices": [{
            "index": 0,
            "delta": {"content": content},
            "finish_reason": finish_reason
        }]
    })
    .to_string()
}

/// Batch job snapshot
pub fn batch_job(id: &str, total: u64, succeeded: u64, failed: u64) -> Value {
    json!({
        "id": id,
        "object": "batch",
        "created": 1_702_256_327,
        "model": TEST_MODEL,
        "results": [],
        "summary": {
            "total_requests": total,
            "succeeded": succeeded,
            "failed": failed,
            "total_duration": 0,
            "average_duration": 0,
            "tokens_used": 0,
            "total_cost": 0.0
        }
    })
}

/// Mistral error body
pub fn error_body(message: &str, error_type: &str) -> Value {
    json!({
        "object": "error",
        "message": message,
        "type": error_type,
        "param": null,
        "code": null
    })
}

/// Model object
pub fn model_object(id: &str) -> Value {
    json!({
        "id": id,
        "object": "model",
        "created": 1_702_256_327,
        "owned_by": "mistralai"
    })
}

/// File object
pub fn file_object(id: &str, filename: &str, purpose: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 12,
        "created_at": 1_717_164_000,
        "filename": filename,
        "purpose": purpose
    })
}
