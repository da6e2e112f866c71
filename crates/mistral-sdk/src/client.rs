//! HTTP client for the Mistral SDK.

use crate::config::ClientConfig;
use crate::error::{ApiErrorBody, ApiErrorDetail, Error, Result};
use crate::services::{
    AgentsService, BatchService, ChatService, ClassifiersService, EmbeddingsService, FilesService,
    FimService, FineTuningService, ModelsService, ModerationsService, OcrService,
};
use crate::streaming::EventStream;
use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, RETRY_AFTER,
    USER_AGENT,
};
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const API_VERSION: &str = "v1";

/// Client for the Mistral AI API.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use mistral_sdk::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), mistral_sdk::Error> {
///     let client = Client::builder()
///         .api_key("your-api-key")
///         .build()?;
///
///     let response = client
///         .chat()
///         .builder()
///         .model("mistral-small-latest")
///         .user_message("Hello!")
///         .send()
///         .await?;
///
///     println!("{}", response.content());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    /// HTTP client.
    http: reqwest::Client,
    /// Headers sent with every request.
    headers: HeaderMap,
    /// Client configuration.
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Create a client from `MISTRAL_API_KEY` and `MISTRAL_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let headers = Self::default_headers(&config)?;

        // The request timeout is applied per call so that streams can outlive it.
        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => reqwest::Client::builder()
                .connect_timeout(config.connect_timeout)
                .build()
                .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?,
        };

        Ok(Self {
            http,
            headers,
            config: Arc::new(config),
        })
    }

    fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {e}")))?,
        );

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key_value()))
            .map_err(|e| Error::configuration(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        for (name, value) in &config.custom_headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::configuration(format!("Invalid header name '{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                Error::configuration(format!("Invalid header value for '{name}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Chat completions.
    pub fn chat(&self) -> ChatService<'_> {
        ChatService::new(self)
    }

    /// Model catalogue.
    pub fn models(&self) -> ModelsService<'_> {
        ModelsService::new(self)
    }

    /// Embeddings.
    pub fn embeddings(&self) -> EmbeddingsService<'_> {
        EmbeddingsService::new(self)
    }

    /// File storage.
    pub fn files(&self) -> FilesService<'_> {
        FilesService::new(self)
    }

    /// Fine-tuning jobs.
    pub fn fine_tuning(&self) -> FineTuningService<'_> {
        FineTuningService::new(self)
    }

    /// Content moderation.
    pub fn moderations(&self) -> ModerationsService<'_> {
        ModerationsService::new(self)
    }

    /// Document OCR.
    pub fn ocr(&self) -> OcrService<'_> {
        OcrService::new(self)
    }

    /// Agent chat.
    pub fn agents(&self) -> AgentsService<'_> {
        AgentsService::new(self)
    }

    /// Fill-in-the-middle code completion.
    pub fn fim(&self) -> FimService<'_> {
        FimService::new(self)
    }

    /// Text classification.
    pub fn classifiers(&self) -> ClassifiersService<'_> {
        ClassifiersService::new(self)
    }

    /// Batch jobs.
    pub fn batch(&self) -> BatchService<'_> {
        BatchService::new(self)
    }

    /// Send a request and decode a JSON response.
    #[instrument(skip(self, body))]
    pub(crate) async fn request_json<T, B>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(method, path, body)?).await?;
        self.parse_json(response).await
    }

    /// Send a request whose response body is ignored.
    #[instrument(skip(self, body))]
    pub(crate) async fn request_empty<B>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, path, body)?).await?;
        Ok(())
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        self.request_json::<T, ()>(Method::GET, path, None).await
    }

    /// `POST` a JSON body and decode a JSON response.
    pub(crate) async fn post<T, B>(&self, path: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// Send a multipart form and decode a JSON response.
    #[instrument(skip(self, form))]
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let builder = self.request::<()>(Method::POST, path, None)?.multipart(form);
        let response = self.send(builder).await?;
        self.parse_json(response).await
    }

    /// `GET` a raw resource.
    #[instrument(skip(self))]
    pub(crate) async fn get_bytes(&self, path: &[&str]) -> Result<Bytes> {
        let response = self.send(self.request::<()>(Method::GET, path, None)?).await?;
        response.bytes().await.map_err(|e| self.map_reqwest_error(e))
    }

    /// `POST` a JSON body and decode the response as a frame stream.
    ///
    /// A non-2xx status is returned as an error; no stream is created.
    #[instrument(skip(self, body))]
    pub(crate) async fn open_stream<T, B>(&self, path: &[&str], body: &B) -> Result<EventStream<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!("Opening stream at {}", url);

        let mut headers = self.headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let builder = self.http.post(url).headers(headers).json(body);
        let response = self.send(builder).await?;

        Ok(EventStream::new(response.bytes_stream()))
    }

    /// Build a URL from API path segments. Each segment is percent-encoded.
    pub(crate) fn url(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::configuration(format!("Base URL cannot carry a path: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(path);
        Ok(url)
    }

    fn request<B>(&self, method: Method, path: &[&str], body: Option<&B>) -> Result<RequestBuilder>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!("Sending {} request to {}", method, url);

        let mut builder = self
            .http
            .request(method, url)
            .headers(self.headers.clone())
            .timeout(self.config.timeout);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder)
    }

    /// Send a request, turning transport failures and non-2xx statuses into errors.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| self.map_reqwest_error(e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(response).await)
        }
    }

    async fn parse_json<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = response.bytes().await.map_err(|e| self.map_reqwest_error(e))?;
        serde_json::from_slice(&body).map_err(|e| Error::parse_error(e.to_string()))
    }

    /// Handle an error response.
    pub(crate) async fn handle_error_response(response: Response) -> Error {
        let status = response.status().as_u16();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(ApiErrorBody::into_detail);

        debug!(status, request_id = ?request_id, body = %body, "API error response");

        let message = detail
            .as_ref()
            .map(ApiErrorDetail::message_text)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                }
            });

        match status {
            401 => Error::Authentication { message },
            429 => Error::RateLimited {
                message,
                retry_after,
                request_id,
            },
            503 => Error::Unavailable { message },
            _ => Error::Api {
                status,
                message,
                error_type: detail.and_then(|d| d.kind()),
                request_id,
            },
        }
    }

    /// Map a reqwest error to an SDK error.
    fn map_reqwest_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::timeout(u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if error.is_connect() {
            Error::connection(error.to_string())
        } else {
            Error::Http(error)
        }
    }
}

/// Builder for creating a Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<Secret<String>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    custom_headers: Vec<(String, String)>,
    poll_interval: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(key.into()));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Set the interval between batch status checks.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Send requests through the given HTTP client.
    ///
    /// Use this for proxies, custom TLS roots or middleware. The client's own
    /// timeouts apply; `connect_timeout` is ignored.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::configuration("API key is required"))?;
        let mut config = ClientConfig::new(api_key.expose_secret().as_str())?;

        if let Some(base_url) = self.base_url {
            config.base_url = Url::parse(&base_url)
                .map_err(|e| Error::configuration(format!("Invalid base URL '{base_url}': {e}")))?;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.connect_timeout = connect_timeout;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(poll_interval) = self.poll_interval {
            config.poll_interval = poll_interval;
        }
        config.custom_headers = self.custom_headers;
        config.http_client = self.http_client;

        Client::with_config(config)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}
