//! Mock Mistral API for integration testing
//!
//! A wiremock server with helpers that mount the endpoints a test needs.

use crate::fixtures::{batch_job, chat_response, error_body};
use crate::helpers::{test_client, TEST_API_KEY};
use mistral_sdk::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Mock Mistral API server
pub struct MockMistral {
    pub server: MockServer,
}

impl MockMistral {
    /// Start a new mock server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// SDK client pointed at this server
    pub fn client(&self) -> Client {
        test_client(&self.url())
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Answer `method path` with a JSON body
    pub async fn mock_json(&self, http_method: &str, api_path: &str, body: Value) {
        Mock::given(method(http_method))
            .and(path(api_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with an empty 200
    pub async fn mock_empty(&self, http_method: &str, api_path: &str) {
        Mock::given(method(http_method))
            .and(path(api_path))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Setup a successful chat completion that requires the test API key
    pub async fn mock_chat_completion(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(content)))
            .expect(1..)
            .mount(&self.server)
            .await;
    }

    /// Answer `POST path` with a streamed body
    pub async fn mock_stream(&self, api_path: &str, body: String) {
        Mock::given(method("POST"))
            .and(path(api_path))
            .and(header("accept", "text/event-stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with an API error
    pub async fn mock_error(&self, http_method: &str, api_path: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(api_path))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(error_body(message, "invalid_request_error"))
                    .insert_header("x-request-id", "req-123"),
            )
            .mount(&self.server)
            .await;
    }

    /// Setup a rate limit error response
    pub async fn mock_rate_limit(&self, api_path: &str) {
        Mock::given(method("POST"))
            .and(path(api_path))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(error_body("Requests rate limit exceeded", "rate_limited"))
                    .insert_header("retry-after", "30")
                    .insert_header("x-request-id", "req-429"),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve batch snapshots in order, repeating the last one.
    ///
    /// Returns a counter of status fetches.
    pub async fn mock_batch_progress(
        &self,
        batch_id: &str,
        snapshots: Vec<(u64, u64, u64)>,
    ) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let responder = BatchProgress {
            bodies: snapshots
                .into_iter()
                .map(|(total, succeeded, failed)| batch_job(batch_id, total, succeeded, failed))
                .collect(),
            calls: calls.clone(),
        };

        Mock::given(method("GET"))
            .and(path(format!("/v1/batch/{batch_id}")))
            .respond_with(responder)
            .mount(&self.server)
            .await;

        calls
    }
}

struct BatchProgress {
    bodies: Vec<Value>,
    calls: Arc<AtomicUsize>,
}

impl Respond for BatchProgress {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self
            .bodies
            .get(call)
            .or_else(|| self.bodies.last())
            .cloned()
            .unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(body)
    }
}
