//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::private("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`GitlabConfig`](crate::GitlabConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid GitLab token.")]
    EmptyToken,

    /// The server URL is invalid.
    #[error("Invalid GitLab URL '{url}'. Please provide a URL with scheme (e.g., 'https://gitlab.example.com').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Only '4' is supported.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Page size is outside the range accepted by the server.
    #[error("Invalid per_page value {value}. Expected a value between 1 and 100.")]
    InvalidPerPage {
        /// The rejected value.
        value: u32,
    },

    /// Pagination mode is not recognized.
    #[error("Invalid pagination mode '{mode}'. Expected 'offset' or 'keyset'.")]
    InvalidPagination {
        /// The rejected mode.
        mode: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An environment variable held an unparsable value.
    #[error("Invalid value for environment variable {name}: '{value}'")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// The raw value.
        value: String,
    },
}
