//! Batch job tests

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_api::*;
use mistral_sdk::{
    BatchOptions, CancelSignal, ChatCompletionRequest, Error, Message, PollConfig, PollOutcome,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test]
async fn test_wait_for_completion_polls_until_resolved() {
    let mock = MockMistral::new().await;
    let calls = mock
        .mock_batch_progress("batch-1", vec![(10, 3, 0), (10, 7, 3)])
        .await;

    let job = mock
        .client()
        .batch()
        .wait_for_completion("batch-1")
        .await
        .expect("wait failed");

    assert_eq!(job.summary.succeeded, 7);
    assert_eq!(job.summary.failed, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_wait_treats_overshooting_counters_as_complete() {
    let mock = MockMistral::new().await;
    let calls = mock.mock_batch_progress("batch-2", vec![(10, 9, 4)]).await;

    let job = mock
        .client()
        .batch()
        .wait_for_completion("batch-2")
        .await
        .unwrap();

    assert!(job.is_complete());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wait_cancelled_before_first_fetch() {
    let mock = MockMistral::new().await;
    let calls = mock.mock_batch_progress("batch-3", vec![(10, 0, 0)]).await;

    let cancel = CancelSignal::new();
    cancel.cancel("caller gave up");
    let outcome = mock
        .client()
        .batch()
        .wait_for_completion_with("batch-3", PollConfig::new().with_cancel(cancel))
        .await
        .unwrap();

    assert!(matches!(outcome, PollOutcome::Cancelled { ref reason } if reason == "caller gave up"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wait_cancelled_while_sleeping() {
    let mock = MockMistral::new().await;
    let calls = mock.mock_batch_progress("batch-4", vec![(10, 1, 0)]).await;

    let cancel = CancelSignal::new();
    let config = PollConfig::new()
        .with_interval(Duration::from_secs(3600))
        .with_cancel(cancel.clone());

    let client = mock.client();
    let batch = client.batch();
    let canceller = async {
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        cancel.cancel("deadline");
    };
    let (outcome, ()) = tokio::join!(
        batch.wait_for_completion_with("batch-4", config),
        canceller
    );

    assert!(outcome.unwrap().is_cancelled());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wait_propagates_fetch_error() {
    let mock = MockMistral::new().await;
    mock.mock_error("GET", "/v1/batch/missing", 404, "Batch not found")
        .await;

    let err = mock
        .client()
        .batch()
        .wait_for_completion("missing")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_create_chat_batch_defaults() {
    let mock = MockMistral::new().await;
    mock.mock_json("POST", "/v1/batch", batch_job("batch-5", 2, 0, 0))
        .await;

    let requests = vec![
        ChatCompletionRequest::new("mistral-large-latest", vec![Message::user("one")]),
        ChatCompletionRequest::new(TEST_MODEL, vec![Message::user("two")]),
    ];
    let job = mock
        .client()
        .batch()
        .create_chat(&requests, None)
        .await
        .unwrap();

    assert_eq!(job.id, "batch-5");
    let sent: serde_json::Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["model"], "mistral-large-latest");
    assert_eq!(sent["requests"].as_array().unwrap().len(), 2);
    assert_eq!(
        sent["options"],
        serde_json::json!({"max_concurrency": 5, "chunk_size": 100})
    );
}

#[tokio::test]
async fn test_create_chat_batch_rejects_empty_input() {
    let mock = MockMistral::new().await;

    let err = mock
        .client()
        .batch()
        .create_chat(&[], None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidRequest { .. }));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_create_embeddings_batch() {
    let mock = MockMistral::new().await;
    mock.mock_json("POST", "/v1/batch", batch_job("batch-6", 3, 0, 0))
        .await;

    let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let options = BatchOptions {
        max_concurrency: Some(2),
        ..BatchOptions::embedding_defaults()
    };
    mock.client()
        .batch()
        .create_embeddings(&texts, "mistral-embed", Some(options))
        .await
        .unwrap();

    let sent: serde_json::Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["model"], "mistral-embed");
    assert_eq!(
        sent["requests"][1],
        serde_json::json!({"model": "mistral-embed", "input": ["b"]})
    );
    assert_eq!(sent["options"]["max_concurrency"], 2);
    assert_eq!(sent["options"]["chunk_size"], 1000);
}

#[tokio::test]
async fn test_cancel_batch() {
    let mock = MockMistral::new().await;
    mock.mock_empty("POST", "/v1/batch/batch-7/cancel").await;

    mock.client().batch().cancel("batch-7").await.unwrap();

    assert_eq!(mock.requests().await.len(), 1);
}
