//! Error types for the Mistral SDK.

use thiserror::Error;

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Mistral SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error during client setup.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local I/O failed (reading a file for upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
        /// Error type/code from the server.
        error_type: Option<String>,
        /// Request ID for debugging.
        request_id: Option<String>,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {message} (retry after {retry_after:?} seconds)")]
    RateLimited {
        /// Error message from the server.
        message: String,
        /// Number of seconds to wait before retrying.
        retry_after: Option<u64>,
        /// Request ID for debugging.
        request_id: Option<String>,
    },

    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message describing the authentication failure.
        message: String,
    },

    /// Invalid request parameters, rejected before anything was sent.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message describing the invalid request.
        message: String,
    },

    /// Response parsing failed.
    #[error("Failed to parse response: {message}")]
    ParseError {
        /// Error message describing the parse failure.
        message: String,
    },

    /// A stream frame carried a payload that is not valid JSON for the
    /// expected message type. The stream is unusable afterwards.
    #[error("Malformed stream frame: {message}")]
    MalformedFrame {
        /// Parser error.
        message: String,
        /// The offending payload.
        payload: String,
    },

    /// The stream was read after `close()`.
    #[error("Stream is closed")]
    StreamClosed,

    /// Timeout waiting for response.
    #[error("Request timed out after {duration_ms}ms")]
    Timeout {
        /// Duration in milliseconds before timeout.
        duration_ms: u64,
    },

    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message describing the connection error.
        message: String,
    },

    /// Server unavailable.
    #[error("Server unavailable: {message}")]
    Unavailable {
        /// Error message describing the unavailability.
        message: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an API error from response details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            error_type: None,
            request_id: None,
        }
    }

    /// Create a rate limited error.
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after,
            request_id: None,
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a malformed frame error.
    pub fn malformed_frame(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::MalformedFrame {
            message: message.into(),
            payload: payload.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Check if the error is retryable.
    ///
    /// The SDK never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. }
            | Self::Unavailable { .. }
            | Self::Timeout { .. }
            | Self::Connection { .. } => true,
            Self::Api { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Authentication { .. } => Some(401),
            Self::Unavailable { .. } => Some(503),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } | Self::RateLimited { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }

    /// Get the retry-after duration if available.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => {
                retry_after.map(std::time::Duration::from_secs)
            }
            _ => None,
        }
    }
}

/// Error body returned by the API.
///
/// Mistral answers with a flat object (`{"object": "error", "message": ...}`),
/// some proxies wrap it OpenAI-style in an `error` field. Both are accepted.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiErrorBody {
    /// `{"error": {...}}`
    Nested {
        /// Error details.
        error: ApiErrorDetail,
    },
    /// `{"message": ..., "type": ..., "code": ...}`
    Flat(ApiErrorDetail),
}

/// Detailed error information from the API.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ApiErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Human-readable error message. Validation errors carry it under `detail`.
    #[serde(alias = "detail")]
    pub message: serde_json::Value,
    /// Error code, numeric or string.
    pub code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub(crate) fn into_detail(self) -> ApiErrorDetail {
        match self {
            Self::Nested { error } | Self::Flat(error) => error,
        }
    }
}

impl ApiErrorDetail {
    /// Message as plain text; structured messages are rendered as JSON.
    pub(crate) fn message_text(&self) -> String {
        match &self.message {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Error type, falling back to the error code.
    pub(crate) fn kind(&self) -> Option<String> {
        self.error_type.clone().or_else(|| {
            self.code.as_ref().and_then(|code| match code {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
        })
    }
}
