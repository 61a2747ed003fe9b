//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the server
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use gitlab_api::clients::{HttpError, Transport};
//!
//! match transport.send(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` is taken from the `message` or `error` field of a JSON error
/// body when present, otherwise it is the raw body text.
///
/// # Example
///
/// ```rust
/// use gitlab_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "404 Project Not Found".to_string(),
///     body: r#"{"message":"404 Project Not Found"}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert_eq!(error.to_string(), "404: 404 Project Not Found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable error message extracted from the body.
    pub message: String,
    /// The raw response body.
    pub body: String,
    /// Request id for error reporting (from `X-Request-Id`).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last response: {code}: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of attempts made.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
    /// Raw body of the last response.
    pub body: String,
    /// Request id for error reporting (from `X-Request-Id`).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// Files were attached to a request that is not multipart.
    #[error("Cannot attach files to a request whose body_type is not multipart.")]
    FilesRequireMultipart,

    /// A multipart body must be a JSON object of form fields.
    #[error("Multipart body must be a JSON object, got {found}.")]
    InvalidMultipartBody {
        /// Description of the value that was provided.
        found: String,
    },

    /// The path could not be joined into a URL.
    #[error("Invalid request path '{path}'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the raw response body, if the server answered.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Response(e) => Some(&e.body),
            Self::MaxRetries(e) => Some(&e.body),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}
