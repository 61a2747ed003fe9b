//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated GitLab server URL (e.g. `https://gitlab.example.com`).
///
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use gitlab_api::GitlabUrl;
///
/// let url = GitlabUrl::new("https://gitlab.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://gitlab.example.com");
/// assert_eq!(url.host_name(), "gitlab.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitlabUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl GitlabUrl {
    /// Creates a new validated server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for GitlabUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for GitlabUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated access token, tagged with the header it authenticates through.
///
/// # Security
///
/// The `Debug` implementation masks the token value.
///
/// # Example
///
/// ```rust
/// use gitlab_api::AccessToken;
///
/// let token = AccessToken::private("glpat-secret").unwrap();
/// assert_eq!(token.header(), ("PRIVATE-TOKEN", "glpat-secret".to_string()));
/// assert!(!format!("{:?}", token).contains("glpat-secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// Personal, project or group access token (`PRIVATE-TOKEN` header).
    Private(String),
    /// OAuth2 bearer token (`Authorization: Bearer` header).
    OAuth(String),
    /// CI job token (`JOB-TOKEN` header).
    Job(String),
}

impl AccessToken {
    /// Creates a private token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn private(token: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(token.into()).map(Self::Private)
    }

    /// Creates an OAuth2 bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn oauth(token: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(token.into()).map(Self::OAuth)
    }

    /// Creates a CI job token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn job(token: impl Into<String>) -> Result<Self, ConfigError> {
        non_empty(token.into()).map(Self::Job)
    }

    /// Returns the header name and value carrying this token.
    #[must_use]
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::Private(token) => ("PRIVATE-TOKEN", token.clone()),
            Self::OAuth(token) => ("Authorization", format!("Bearer {token}")),
            Self::Job(token) => ("JOB-TOKEN", token.clone()),
        }
    }
}

fn non_empty(token: String) -> Result<String, ConfigError> {
    if token.trim().is_empty() {
        Err(ConfigError::EmptyToken)
    } else {
        Ok(token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Private(_) => "Private",
            Self::OAuth(_) => "OAuth",
            Self::Job(_) => "Job",
        };
        write!(f, "AccessToken::{kind}(*****)")
    }
}
