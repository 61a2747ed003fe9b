//! HTTP client for GitLab API communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] used outside of tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{ListDefaults, Transport};
use crate::config::GitlabConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base delay for exponential backoff when no `Retry-After` is given.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Status codes retried when `retry_transient_errors` is enabled.
const TRANSIENT_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// HTTP client for making requests to the GitLab API.
///
/// The client handles:
/// - URL construction from the server URL and API version
/// - Default headers including User-Agent and the access token header
/// - JSON and multipart bodies
/// - Retries for 429 (when `obey_rate_limit`) and transient 5xx responses
///   (when `retry_transient_errors`)
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,no_run
/// use gitlab_api::{AccessToken, GitlabConfig, GitlabUrl, HttpClient};
///
/// let config = GitlabConfig::builder()
///     .url(GitlabUrl::new("https://gitlab.example.com").unwrap())
///     .token(AccessToken::private("glpat-token").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config).unwrap();
/// assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
    list_defaults: ListDefaults,
    max_retries: u32,
    obey_rate_limit: bool,
    retry_transient_errors: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &GitlabConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}gitlab-api-rust/{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = config.token() {
            let (name, value) = token.header();
            default_headers.insert(name.to_string(), value);
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_url(),
            default_headers,
            list_defaults: ListDefaults {
                per_page: config.per_page(),
                order_by: config.order_by().map(String::from),
                pagination: config.pagination(),
            },
            max_retries: config.max_retries(),
            obey_rate_limit: config.obey_rate_limit(),
            retry_transient_errors: config.retry_transient_errors(),
        })
    }

    /// Creates a client from environment variables.
    ///
    /// See [`GitlabConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] wrapped in a boxed error if the
    /// environment is incomplete, or the client cannot be created.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = GitlabConfig::from_env()?;
        Ok(Self::new(&config)?)
    }

    /// Returns the API base URL (server URL plus `/api/v4`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a request path.
    ///
    /// Absolute URLs are used verbatim.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build_request(&self, request: &HttpRequest, url: &str) -> reqwest::RequestBuilder {
        let method = match request.http_method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        };
        let mut req_builder = self.client.request(method, url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        match request.body_type {
            Some(DataType::Multipart) => {
                req_builder = req_builder.multipart(Self::multipart_form(request));
            }
            Some(DataType::Json) => {
                if let Some(body) = &request.body {
                    req_builder = req_builder
                        .header("Content-Type", DataType::Json.as_content_type())
                        .body(body.to_string());
                }
            }
            None => {}
        }

        req_builder
    }

    fn multipart_form(request: &HttpRequest) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();

        if let Some(Value::Object(fields)) = &request.body {
            for (key, value) in fields {
                form = match value {
                    Value::Null => form,
                    Value::String(s) => form.text(key.clone(), s.clone()),
                    Value::Array(items) => items.iter().fold(form, |form, item| {
                        form.text(format!("{key}[]"), form_text(item))
                    }),
                    other => form.text(key.clone(), form_text(other)),
                };
            }
        }

        for file in &request.files {
            let part =
                reqwest::multipart::Part::bytes(file.content.clone()).file_name(file.filename.clone());
            form = form.part(file.field.clone(), part);
        }

        form
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses the body text: empty is `Null`, non-JSON is kept as a string.
    fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    /// Extracts the message GitLab reports for an error response.
    ///
    /// `error` takes precedence over `message`; without either the raw body
    /// is returned.
    fn error_message(body: &Value, raw: &str) -> String {
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key))
            .last()
            .map_or_else(|| raw.to_string(), form_text)
    }

    fn should_retry(&self, code: u16) -> bool {
        (code == 429 && self.obey_rate_limit)
            || (self.retry_transient_errors
                && (TRANSIENT_STATUS_CODES.contains(&code) || (520..=530).contains(&code)))
    }

    /// Calculates the retry delay: `Retry-After` if present, else exponential backoff.
    fn retry_delay(response: Option<&HttpResponse>, retries: u32) -> Duration {
        response
            .and_then(HttpResponse::retry_after)
            .map_or_else(
                || RETRY_BASE_DELAY * 2u32.saturating_pow(retries),
                Duration::from_secs_f64,
            )
    }
}

fn form_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Transport for HttpClient {
    /// Sends an HTTP request to the GitLab API.
    ///
    /// The request is attempted up to `request.tries` times, or
    /// `max_retries + 1` times when unset.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.build_url(&request.path);
        let max_tries = request
            .tries
            .unwrap_or_else(|| self.max_retries.saturating_add(1))
            .max(1);

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(method = %request.http_method, %url, attempt = tries, "sending request");

            let res = match self.build_request(&request, &url).send().await {
                Ok(res) => res,
                Err(err) => {
                    if self.retry_transient_errors && tries < max_tries {
                        let delay = Self::retry_delay(None, tries - 1);
                        tracing::debug!(error = %err, ?delay, "network error, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(err.into());
                }
            };

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let body = Self::parse_body(&body_text);

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let message = Self::error_message(&response.body, &body_text);
            let error_reference = response.request_id().map(String::from);

            if !self.should_retry(code) {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    body: body_text,
                    error_reference,
                }));
            }

            if tries >= max_tries {
                if max_tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message,
                        body: body_text,
                        error_reference,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries,
                    message,
                    body: body_text,
                    error_reference,
                }));
            }

            let delay = Self::retry_delay(Some(&response), tries - 1);
            tracing::debug!(code, ?delay, "retrying request");
            tokio::time::sleep(delay).await;
        }
    }

    fn list_defaults(&self) -> ListDefaults {
        self.list_defaults.clone()
    }
}
