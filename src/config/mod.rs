//! Configuration types for the GitLab API client.
//!
//! This module provides the configuration used to build an
//! [`HttpClient`](crate::HttpClient) and the listing defaults that every
//! manager merges into its list calls.
//!
//! # Overview
//!
//! - [`GitlabConfig`]: The main configuration struct
//! - [`GitlabConfigBuilder`]: A builder for constructing [`GitlabConfig`] instances
//! - [`GitlabUrl`]: A validated server URL
//! - [`AccessToken`]: A validated token with masked debug output
//! - [`ApiVersion`]: The REST API version
//! - [`PaginationMode`]: Offset or keyset pagination
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::{AccessToken, GitlabConfig, GitlabUrl, PaginationMode};
//!
//! let config = GitlabConfig::builder()
//!     .url(GitlabUrl::new("https://gitlab.example.com").unwrap())
//!     .token(AccessToken::private("glpat-token").unwrap())
//!     .per_page(50)
//!     .pagination(PaginationMode::Keyset)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.per_page(), Some(50));
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, GitlabUrl};
pub use version::ApiVersion;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default number of attempts for rate-limited or transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Largest page size accepted by GitLab.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination strategy requested for list calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Page-number pagination driven by `X-Next-Page`.
    Offset,
    /// Cursor pagination driven by the `Link` next URL.
    Keyset,
}

impl PaginationMode {
    /// Returns the value sent as the `pagination` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::Keyset => "keyset",
        }
    }
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offset" => Ok(Self::Offset),
            "keyset" => Ok(Self::Keyset),
            _ => Err(ConfigError::InvalidPagination {
                mode: s.to_string(),
            }),
        }
    }
}

/// Configuration for a GitLab API connection.
///
/// # Thread Safety
///
/// `GitlabConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use gitlab_api::{GitlabConfig, GitlabUrl};
///
/// let config = GitlabConfig::builder()
///     .url(GitlabUrl::new("https://gitlab.com").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(config.token().is_none());
/// assert!(config.obey_rate_limit());
/// ```
#[derive(Clone, Debug)]
pub struct GitlabConfig {
    url: GitlabUrl,
    token: Option<AccessToken>,
    api_version: ApiVersion,
    per_page: Option<u32>,
    order_by: Option<String>,
    pagination: Option<PaginationMode>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
    obey_rate_limit: bool,
    retry_transient_errors: bool,
}

impl GitlabConfig {
    /// Creates a new builder for constructing a `GitlabConfig`.
    #[must_use]
    pub fn builder() -> GitlabConfigBuilder {
        GitlabConfigBuilder::new()
    }

    /// Builds a configuration from environment variables.
    ///
    /// Reads `GITLAB_URL` (required), one of `GITLAB_PRIVATE_TOKEN`,
    /// `GITLAB_OAUTH_TOKEN` or `CI_JOB_TOKEN` (first match wins), and
    /// `GITLAB_PER_PAGE`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `GITLAB_URL` is missing or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = lookup("GITLAB_URL")
            .ok_or(ConfigError::MissingRequiredField { field: "GITLAB_URL" })?;
        let mut builder = Self::builder().url(GitlabUrl::new(url)?);

        if let Some(token) = lookup("GITLAB_PRIVATE_TOKEN") {
            builder = builder.token(AccessToken::private(token)?);
        } else if let Some(token) = lookup("GITLAB_OAUTH_TOKEN") {
            builder = builder.token(AccessToken::oauth(token)?);
        } else if let Some(token) = lookup("CI_JOB_TOKEN") {
            builder = builder.token(AccessToken::job(token)?);
        }

        if let Some(raw) = lookup("GITLAB_PER_PAGE") {
            let per_page = raw.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                name: "GITLAB_PER_PAGE",
                value: raw.clone(),
            })?;
            builder = builder.per_page(per_page);
        }

        builder.build()
    }

    /// Returns the server URL.
    #[must_use]
    pub const fn url(&self) -> &GitlabUrl {
        &self.url
    }

    /// Returns the full API base URL, e.g. `https://gitlab.com/api/v4`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}{}", self.url, self.api_version.base_path())
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the default page size for list calls.
    #[must_use]
    pub const fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// Returns the default ordering for list calls.
    #[must_use]
    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Returns the default pagination mode for list calls.
    #[must_use]
    pub const fn pagination(&self) -> Option<PaginationMode> {
        self.pagination
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the maximum number of attempts per request.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns whether 429 responses are retried after `Retry-After`.
    #[must_use]
    pub const fn obey_rate_limit(&self) -> bool {
        self.obey_rate_limit
    }

    /// Returns whether transient 5xx responses are retried.
    #[must_use]
    pub const fn retry_transient_errors(&self) -> bool {
        self.retry_transient_errors
    }
}

// Verify GitlabConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GitlabConfig>();
};

/// Builder for constructing [`GitlabConfig`] instances.
///
/// The only required field is `url`.
///
/// # Defaults
///
/// - `token`: `None` (anonymous access)
/// - `api_version`: [`ApiVersion::V4`]
/// - `per_page`, `order_by`, `pagination`, `timeout`: `None` (server defaults)
/// - `max_retries`: [`DEFAULT_MAX_RETRIES`]
/// - `obey_rate_limit`: `true`
/// - `retry_transient_errors`: `false`
#[derive(Debug, Default)]
pub struct GitlabConfigBuilder {
    url: Option<GitlabUrl>,
    token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    per_page: Option<u32>,
    order_by: Option<String>,
    pagination: Option<PaginationMode>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    obey_rate_limit: Option<bool>,
    retry_transient_errors: Option<bool>,
}

impl GitlabConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL (required).
    #[must_use]
    pub fn url(mut self, url: GitlabUrl) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the default page size. Validated on [`build`](Self::build).
    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the default `order_by` for list calls.
    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Sets the default pagination mode.
    #[must_use]
    pub const fn pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = Some(mode);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of attempts per request.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets whether 429 responses are retried.
    #[must_use]
    pub const fn obey_rate_limit(mut self, obey: bool) -> Self {
        self.obey_rate_limit = Some(obey);
        self
    }

    /// Sets whether transient 5xx responses are retried.
    #[must_use]
    pub const fn retry_transient_errors(mut self, retry: bool) -> Self {
        self.retry_transient_errors = Some(retry);
        self
    }

    /// Builds the [`GitlabConfig`], validating required fields and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `url` is not set, or
    /// [`ConfigError::InvalidPerPage`] if `per_page` is outside `1..=100`.
    pub fn build(self) -> Result<GitlabConfig, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;

        if let Some(value) = self.per_page {
            if value == 0 || value > MAX_PER_PAGE {
                return Err(ConfigError::InvalidPerPage { value });
            }
        }

        Ok(GitlabConfig {
            url,
            token: self.token,
            api_version: self.api_version.unwrap_or_default(),
            per_page: self.per_page,
            order_by: self.order_by,
            pagination: self.pagination,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            obey_rate_limit: self.obey_rate_limit.unwrap_or(true),
            retry_transient_errors: self.retry_transient_errors.unwrap_or(false),
        })
    }
}
