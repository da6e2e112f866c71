//! Test helper utilities for integration tests

use mistral_sdk::Client;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// API key every test client sends.
pub const TEST_API_KEY: &str = "test-api-key";

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Client pointed at a mock server.
pub fn test_client(base_url: &str) -> Client {
    init_tracing();
    Client::builder()
        .base_url(base_url)
        .api_key(TEST_API_KEY)
        .timeout(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(10))
        .build()
        .expect("Failed to create client")
}

/// Join stream frames into an SSE body.
pub fn sse_body(frames: &[String]) -> String {
    frames
        .iter()
        .map(|frame| format!("data: {frame}\n\n"))
        .collect()
}

/// Join stream frames into a body of JSON envelopes, one per line.
pub fn envelope_body(frames: &[String]) -> String {
    frames
        .iter()
        .map(|frame| format!("{}\n", serde_json::json!({ "data": frame })))
        .collect()
}
