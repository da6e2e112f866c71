//! Client configuration for the Mistral SDK.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use url::Url;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MISTRAL_BASE_URL";

/// Configuration for the Mistral SDK client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without the version segment.
    pub(crate) base_url: Url,
    /// API key for authentication.
    pub(crate) api_key: Secret<String>,
    /// Request timeout duration. Streaming requests are not bounded by it.
    pub(crate) timeout: Duration,
    /// Connection timeout duration.
    pub(crate) connect_timeout: Duration,
    /// User agent string.
    pub(crate) user_agent: String,
    /// Custom headers to include in requests.
    pub(crate) custom_headers: Vec<(String, String)>,
    /// Interval between batch status checks.
    pub(crate) poll_interval: Duration,
    /// Caller-supplied HTTP client, used instead of building one.
    pub(crate) http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Default base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.mistral.ai";
    /// Default request timeout (120 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
    /// Default connection timeout (10 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default interval between batch status checks (2 seconds).
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
    /// Default user agent.
    pub const DEFAULT_USER_AGENT: &'static str =
        concat!("mistral-sdk-rust/", env!("CARGO_PKG_VERSION"));

    /// Create a new configuration with default values.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::configuration("API key is required"));
        }

        let base_url = Url::parse(Self::DEFAULT_BASE_URL)
            .map_err(|e| Error::configuration(format!("Invalid default URL: {e}")))?;

        Ok(Self {
            base_url,
            api_key: Secret::new(api_key),
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            custom_headers: Vec::new(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            http_client: None,
        })
    }

    /// Build a configuration from `MISTRAL_API_KEY` and, if set,
    /// `MISTRAL_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::configuration(format!("{API_KEY_ENV} is not set")))?;
        let mut config = Self::new(api_key)?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = Url::parse(&base_url).map_err(|e| {
                Error::configuration(format!("Invalid {BASE_URL_ENV} '{base_url}': {e}"))
            })?;
        }

        Ok(config)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the API key (exposed for use in requests).
    pub(crate) fn api_key_value(&self) -> &str {
        self.api_key.expose_secret().as_str()
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get custom headers.
    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.custom_headers
    }

    /// Get the batch poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Use the given HTTP client instead of building one.
    ///
    /// Its own timeouts and TLS settings apply; the SDK still sends its
    /// headers on every request.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }
}
