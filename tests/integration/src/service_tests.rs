//! Resource service tests

use crate::fixtures::*;
use crate::mock_api::*;
use mistral_sdk::{
    ClassifierRequest, CreateFineTuningJobRequest, Error, FilePurpose, FimRequest, Message,
    OcrRequest,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, Respond, ResponseTemplate};

/// Embeds every input as `[first byte of the text, position in the request]`.
struct EchoEmbeddings;

impl Respond for EchoEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = request.body_json().unwrap_or(Value::Null);
        let data: Vec<Value> = body["input"]
            .as_array()
            .map(|inputs| {
                inputs
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(index, text)| {
                        let first = text.as_str().and_then(|t| t.bytes().next()).unwrap_or(0);
                        json!({
                            "object": "embedding",
                            "index": index,
                            "embedding": [f32::from(first), index as f32]
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        ResponseTemplate::new(200).set_body_json(json!({
            "id": "emb-1",
            "object": "list",
            "model": "mistral-embed",
            "data": data,
            "usage": {"prompt_tokens": 1, "completion_tokens": 0, "total_tokens": 1}
        }))
    }
}

#[tokio::test]
async fn test_models_list_and_get() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "GET",
        "/v1/models",
        json!({"object": "list", "data": [model_object(TEST_MODEL), model_object("codestral-latest")]}),
    )
    .await;
    mock.mock_json("GET", "/v1/models/codestral-latest", model_object("codestral-latest"))
        .await;

    let client = mock.client();
    let models = client.models().list().await.unwrap();
    let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![TEST_MODEL, "codestral-latest"]);

    let model = client.models().get("codestral-latest").await.unwrap();
    assert_eq!(model.owned_by, "mistralai");
}

#[tokio::test]
async fn test_model_metadata_endpoints() {
    let mock = MockMistral::new().await;
    let enhanced = json!({
        "id": TEST_MODEL,
        "object": "model",
        "version": "2409",
        "capabilities": [{"name": "function_calling", "description": "", "available": true}],
        "max_tokens": 32768
    });
    mock.mock_json("GET", "/v1/models/m/versions", json!({"versions": [enhanced]}))
        .await;
    mock.mock_json(
        "GET",
        "/v1/models/m/capabilities",
        json!({"capabilities": [{"name": "vision", "description": "images", "available": false}]}),
    )
    .await;
    mock.mock_json(
        "GET",
        "/v1/models/m/performance",
        json!({"metrics": [{"metric": "latency_p50", "value": 120.5, "unit": "ms"}]}),
    )
    .await;
    mock.mock_json("POST", "/v1/models/m/tokenize", json!({"token_count": 7}))
        .await;

    let client = mock.client();
    let models = client.models();

    let versions = models.list_versions("m").await.unwrap();
    assert_eq!(versions[0].version, "2409");
    assert!(versions[0].supports("function_calling"));

    let capabilities = models.capabilities("m").await.unwrap();
    assert!(!capabilities[0].available);

    let metrics = models.performance("m").await.unwrap();
    assert_eq!(metrics[0].unit, "ms");

    assert_eq!(models.estimate_tokens("m", "hello world").await.unwrap(), 7);
    let sent: Value = mock.requests().await.last().unwrap().body_json().unwrap();
    assert_eq!(sent, json!({"text": "hello world"}));
}

#[tokio::test]
async fn test_embeddings_batch_chunks_and_orders() {
    let mock = MockMistral::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(EchoEmbeddings)
        .mount(&mock.server)
        .await;

    let texts: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
    let vectors = mock
        .client()
        .embeddings()
        .batch(&texts, "mistral-embed", 2)
        .await
        .unwrap();

    assert_eq!(mock.requests().await.len(), 3);
    let firsts: Vec<f32> = vectors.iter().map(|v| v[0]).collect();
    assert_eq!(firsts, vec![97.0, 98.0, 99.0, 100.0, 101.0]);
}

#[tokio::test]
async fn test_embeddings_batch_default_size() {
    let mock = MockMistral::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(EchoEmbeddings)
        .mount(&mock.server)
        .await;

    let texts: Vec<String> = (0..40).map(|i| format!("t{i}")).collect();
    let vectors = mock
        .client()
        .embeddings()
        .batch(&texts, "mistral-embed", 0)
        .await
        .unwrap();

    assert_eq!(vectors.len(), 40);
    assert_eq!(mock.requests().await.len(), 2);
}

#[tokio::test]
async fn test_embeddings_similarity() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "POST",
        "/v1/embeddings/enhanced",
        json!({
            "object": "list",
            "model": "mistral-embed",
            "data": [
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]},
                {"object": "embedding", "index": 1, "embedding": [1.0, 1.0]}
            ]
        }),
    )
    .await;

    let similarity = mock
        .client()
        .embeddings()
        .similarity("cat", "kitten", "mistral-embed")
        .await
        .unwrap();

    assert!((similarity - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    let sent: Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["normalize"], true);
    assert_eq!(sent["input"], json!(["cat", "kitten"]));
}

#[tokio::test]
async fn test_embeddings_similarity_requires_two_vectors() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "POST",
        "/v1/embeddings/enhanced",
        json!({"data": [{"index": 0, "embedding": [1.0]}]}),
    )
    .await;

    let err = mock
        .client()
        .embeddings()
        .similarity("a", "b", "mistral-embed")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("expected 2 embeddings"));
}

#[tokio::test]
async fn test_file_upload_is_multipart() {
    let mock = MockMistral::new().await;
    mock.mock_json("POST", "/v1/files", file_object("file-1", "train.jsonl", "fine-tune"))
        .await;

    let file = mock
        .client()
        .files()
        .upload_bytes("train.jsonl", b"{\"a\":1}\n".to_vec(), FilePurpose::FineTune)
        .await
        .unwrap();

    assert_eq!(file.id, "file-1");
    assert_eq!(file.created_at.timestamp(), 1_717_164_000);

    let request = &mock.requests().await[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\"; filename=\"train.jsonl\""));
    assert!(body.contains("name=\"purpose\""));
    assert!(body.contains("fine-tune"));
}

#[tokio::test]
async fn test_file_upload_missing_path() {
    let mock = MockMistral::new().await;

    let err = mock
        .client()
        .files()
        .upload("/definitely/not/here.jsonl", FilePurpose::Batch)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_file_download_and_delete() {
    let mock = MockMistral::new().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/file-2/content"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"line one\nline two\n".to_vec()))
        .mount(&mock.server)
        .await;
    mock.mock_json("DELETE", "/v1/files/file-2", json!({"id": "file-2", "deleted": true}))
        .await;

    let client = mock.client();
    let content = client.files().download("file-2").await.unwrap();
    assert_eq!(&content[..], b"line one\nline two\n");

    client.files().delete("file-2").await.unwrap();
}

#[tokio::test]
async fn test_fine_tuning_create_and_cancel() {
    let mock = MockMistral::new().await;
    let job = |status: &str| {
        json!({
            "id": "ft-1",
            "model": "open-mistral-7b",
            "status": status,
            "training_files": ["file-1"],
            "created_at": 1_717_164_000
        })
    };
    mock.mock_json("POST", "/v1/fine_tuning/jobs", job("QUEUED")).await;
    mock.mock_json("POST", "/v1/fine_tuning/jobs/ft-1/cancel", job("CANCELLED"))
        .await;

    let client = mock.client();
    let request = CreateFineTuningJobRequest::new("open-mistral-7b", vec!["file-1".to_string()])
        .hyperparameter("learning_rate", json!(0.0001));
    let created = client.fine_tuning().create(&request).await.unwrap();
    assert_eq!(created.status, "QUEUED");

    let sent: Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["hyperparameters"]["learning_rate"], json!(0.0001));

    let cancelled = client.fine_tuning().cancel("ft-1").await.unwrap();
    assert_eq!(cancelled.status, "CANCELLED");
}

#[tokio::test]
async fn test_chat_moderation() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "POST",
        "/v1/chat/moderations",
        json!({
            "id": "mod-1",
            "model": "mistral-moderation-latest",
            "results": [{
                "categories": {"violence": true, "hate": false},
                "category_scores": {"violence": 0.91, "hate": 0.01}
            }]
        }),
    )
    .await;

    let response = mock
        .client()
        .moderations()
        .create_chat(vec![Message::user("...")], "mistral-moderation-latest")
        .await
        .unwrap();

    assert!(response.any_flagged());
    assert_eq!(response.results[0].flagged_categories(), vec!["violence"]);
    let sent: Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["input"][0]["role"], "user");
}

#[tokio::test]
async fn test_ocr_async_flow() {
    let mock = MockMistral::new().await;
    mock.mock_json("POST", "/v1/ocr/async", json!({"job_id": "ocr-9"})).await;
    mock.mock_json(
        "GET",
        "/v1/ocr/async/ocr-9",
        json!({
            "id": "ocr-9",
            "model": "mistral-ocr-latest",
            "results": [{"file_id": "file-1", "text": "Invoice #42", "language": "en"}]
        }),
    )
    .await;

    let client = mock.client();
    let request = OcrRequest {
        model: "mistral-ocr-latest".to_string(),
        files: vec!["file-1".to_string()],
        languages: Vec::new(),
    };
    let job_id = client.ocr().create_async(&request).await.unwrap();
    assert_eq!(job_id, "ocr-9");

    let result = client.ocr().get_async_result(&job_id).await.unwrap();
    assert_eq!(result.results[0].text, "Invoice #42");
}

#[tokio::test]
async fn test_classifier_confidence_and_multi_label() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "POST",
        "/v1/classifiers",
        json!({
            "model": "classifier",
            "results": [{
                "input": "great product",
                "labels": ["positive"],
                "scores": {"positive": 0.93, "negative": 0.07},
                "confidence": 0.93
            }]
        }),
    )
    .await;

    let client = mock.client();
    let labels = vec!["positive".to_string(), "negative".to_string()];
    let scores = client
        .classifiers()
        .confidence("great product", labels.clone(), "classifier")
        .await
        .unwrap();
    assert_eq!(scores.get("positive"), Some(&0.93));

    let request = ClassifierRequest::new("classifier", vec!["great product".to_string()], labels);
    client.classifiers().multi_label(&request).await.unwrap();
    let sent: Value = mock.requests().await[1].body_json().unwrap();
    assert_eq!(sent["multi_label"], true);
}

#[tokio::test]
async fn test_classifier_confidence_without_results() {
    let mock = MockMistral::new().await;
    mock.mock_json("POST", "/v1/classifiers", json!({"results": []})).await;

    let err = mock
        .client()
        .classifiers()
        .confidence("text", vec!["a".to_string()], "classifier")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ParseError { .. }));
}

#[tokio::test]
async fn test_fim_completion() {
    let mock = MockMistral::new().await;
    mock.mock_json(
        "POST",
        "/v1/fim",
        json!({
            "id": "fim-1",
            "model": "codestral-latest",
            "choices": [{"index": 0, "text": "a + b", "finish_reason": "stop"}]
        }),
    )
    .await;

    let request = FimRequest::new("codestral-latest", "def add(a, b):\n    return ", "");
    let response = mock.client().fim().create(&request).await.unwrap();

    assert_eq!(response.text(), "a + b");
    let sent: Value = mock.requests().await[0].body_json().unwrap();
    assert_eq!(sent["prefix"], "def add(a, b):\n    return ");
    assert_eq!(sent["stream"], false);
}
