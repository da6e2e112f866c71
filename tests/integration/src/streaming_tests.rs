//! Streaming endpoint tests

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_api::*;
use futures::StreamExt;
use mistral_sdk::{AgentRequest, Error, FimRequest, Message, StreamState};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_chat_stream_sse() {
    let mock = MockMistral::new().await;
    let body = sse_body(&[
        chat_chunk("Hello", None),
        chat_chunk(", ", None),
        chat_chunk("world!", Some("stop")),
        "[DONE]".to_string(),
    ]);
    mock.mock_stream("/v1/chat/completions", body).await;

    let mut stream = mock
        .client()
        .chat()
        .create_stream(&simple_chat_request())
        .await
        .expect("Failed to open stream");

    let mut pieces = Vec::new();
    while let Some(chunk) = stream.next().await {
        pieces.push(chunk.unwrap().content().to_string());
    }

    assert_eq!(pieces, vec!["Hello", ", ", "world!"]);
    assert_eq!(stream.state(), StreamState::Exhausted);

    let requests = mock.requests().await;
    let sent: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(sent["stream"], true);
    assert_eq!(requests[0].headers.get("cache-control").unwrap(), "no-cache");
}

#[tokio::test]
async fn test_chat_stream_json_envelopes() {
    let mock = MockMistral::new().await;
    let body = envelope_body(&[
        chat_chunk("a", None),
        chat_chunk("b", Some("stop")),
        "[DONE]".to_string(),
    ]);
    mock.mock_stream("/v1/chat/completions", body).await;

    let stream = mock
        .client()
        .chat()
        .builder()
        .model(TEST_MODEL)
        .user_message("Say ab")
        .stream()
        .await
        .unwrap();

    let result = stream.collect_result().await.unwrap();
    assert_eq!(result.content, "ab");
    assert_eq!(result.chunk_count, 2);
    assert_eq!(result.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_stream_without_sentinel_ends_cleanly() {
    let mock = MockMistral::new().await;
    mock.mock_stream(
        "/v1/chat/completions",
        sse_body(&[chat_chunk("only", None)]),
    )
    .await;

    let stream = mock
        .client()
        .chat()
        .create_stream(&simple_chat_request())
        .await
        .unwrap();

    assert_eq!(stream.collect_content().await.unwrap(), "only");
}

#[tokio::test]
async fn test_malformed_frame_then_close() {
    let mock = MockMistral::new().await;
    mock.mock_stream(
        "/v1/chat/completions",
        sse_body(&[chat_chunk("fine", None), "{not json".to_string()]),
    )
    .await;

    let mut stream = mock
        .client()
        .chat()
        .create_stream(&simple_chat_request())
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap().unwrap().content(), "fine");
    match stream.next().await {
        Some(Err(Error::MalformedFrame { payload, .. })) => assert_eq!(payload, "{not json"),
        other => panic!("expected malformed frame, got {other:?}"),
    }

    stream.close();
    stream.close();
    assert!(matches!(stream.next().await, Some(Err(Error::StreamClosed))));
}

#[tokio::test]
async fn test_stream_error_status_before_any_frame() {
    let mock = MockMistral::new().await;
    mock.mock_error("POST", "/v1/chat/completions", 400, "bad request")
        .await;

    let err = mock
        .client()
        .chat()
        .create_stream(&simple_chat_request())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_agent_stream() {
    let mock = MockMistral::new().await;
    let fragment = |content: &str| {
        json!({
            "id": "agent-1",
            "model": TEST_MODEL,
            "actions": [],
            "messages": [{"role": "assistant", "content": content}]
        })
        .to_string()
    };
    mock.mock_stream(
        "/v1/agents/chat",
        sse_body(&[fragment("Looking"), fragment(" it up"), "[DONE]".to_string()]),
    )
    .await;

    let request = AgentRequest::new(TEST_MODEL, vec![Message::user("Weather?")]);
    let stream = mock.client().agents().create_stream(&request).await.unwrap();

    assert_eq!(stream.collect_content().await.unwrap(), "Looking it up");
}

#[tokio::test]
async fn test_fim_stream() {
    let mock = MockMistral::new().await;
    let fragment = |text: &str| {
        json!({
            "id": "fim-1",
            "model": "codestral-latest",
            "choices": [{"index": 0, "text": text}]
        })
        .to_string()
    };
    mock.mock_stream(
        "/v1/fim",
        sse_body(&[fragment("a + "), fragment("b"), "[DONE]".to_string()]),
    )
    .await;

    let request = FimRequest::new("codestral-latest", "def add(a, b):\n    return ", "\n");
    let stream = mock.client().fim().create_stream(&request).await.unwrap();

    assert_eq!(stream.collect_content().await.unwrap(), "a + b");
}
