//! GitLab REST API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// GitLab REST API version.
///
/// Only v4 is served by current GitLab releases; the enum exists so the
/// base path is derived from a typed value rather than a loose string.
///
/// # Example
///
/// ```rust
/// use gitlab_api::ApiVersion;
///
/// let version: ApiVersion = "4".parse().unwrap();
/// assert_eq!(version, ApiVersion::V4);
/// assert_eq!(version.base_path(), "/api/v4");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// REST API v4.
    #[default]
    V4,
}

impl ApiVersion {
    /// Returns the path prefix appended to the server URL.
    #[must_use]
    pub const fn base_path(&self) -> &'static str {
        match self {
            Self::V4 => "/api/v4",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "4"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(['v', 'V']) {
            "4" => Ok(Self::V4),
            other => Err(ConfigError::InvalidApiVersion {
                version: other.to_string(),
            }),
        }
    }
}
