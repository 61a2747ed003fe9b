//! Resource-specific error types for REST API operations.
//!
//! Transport failures are wrapped into an operation-specific variant so a
//! caller can tell a failed `get` from a failed `create` while keeping the
//! status code and response body. A 401 from any operation becomes
//! [`ResourceError::Authentication`].
//!
//! Validation problems ([`ValidationError`]) and path problems
//! ([`ResourceError::MissingParentAttribute`]) are raised before any request
//! is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitlab_api::rest::{GetMixin, ResourceError};
//!
//! match projects.get(42).await {
//!     Ok(project) => println!("{project}"),
//!     Err(ResourceError::Authentication { .. }) => println!("check your token"),
//!     Err(e) if e.status_code() == Some(404) => println!("no such project"),
//!     Err(e) => println!("error: {e}"),
//! }
//! ```

use std::fmt;

use crate::clients::HttpError;
use thiserror::Error;

/// Client-side validation failures, raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required attributes were not supplied.
    #[error("Missing attributes: {}", .missing.join(", "))]
    MissingRequired {
        /// The missing attribute names, in declaration order.
        missing: Vec<String>,
    },

    /// More than one attribute of an exclusive group was supplied.
    #[error("Provide only one of these attributes: {}", .provided.join(", "))]
    ExclusiveConflict {
        /// The supplied attributes of the group.
        provided: Vec<String>,
    },

    /// No attribute of an exclusive group was supplied.
    #[error("Must provide one of these attributes: {}", .choices.join(", "))]
    ExclusiveMissing {
        /// The attributes of the group.
        choices: Vec<String>,
    },

    /// Attribute data was not a JSON object.
    #[error("Attribute data must be a JSON object, got {found}")]
    InvalidData {
        /// The kind of value that was supplied.
        found: &'static str,
    },

    /// A file attribute held something other than file contents.
    #[error("Attribute '{name}' must be a string with the file contents")]
    InvalidFile {
        /// The attribute name.
        name: String,
    },
}

/// Extra context attached to [`ResourceError::AttributeNotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeHint {
    /// The object was fully fetched; the attribute simply does not exist.
    None,
    /// The object was created lazily and holds no server data.
    Lazy,
    /// The object came from a list call and may hold a subset of fields.
    CreatedFromList,
}

impl fmt::Display for AttributeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Lazy => f.write_str(
                ". The object was created as a lazy object and was not initialized \
                 with any data; fetch it with get() or refresh() first",
            ),
            Self::CreatedFromList => f.write_str(
                ". The object was created via a list() call and only a subset of the \
                 data may be present; fetch it with get(id) to ensure all data is present",
            ),
        }
    }
}

/// The manager operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `get`
    Get,
    /// `list`
    List,
    /// `create`
    Create,
    /// `update` or `save`
    Update,
    /// `delete`
    Delete,
    /// `set`
    Set,
    /// `head`
    Head,
    /// A custom sub-path action such as `subscribe`.
    Action(&'static str),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("get"),
            Self::List => f.write_str("list"),
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
            Self::Set => f.write_str("set"),
            Self::Head => f.write_str("head"),
            Self::Action(action) => f.write_str(action),
        }
    }
}

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server returned a body of an unexpected shape.
    #[error("Malformed response for {resource}: expected {expected}")]
    MalformedResponse {
        /// The resource type name.
        resource: &'static str,
        /// What the body should have been (e.g. "a JSON object").
        expected: &'static str,
    },

    /// An attribute read found nothing.
    #[error("'{resource}' object has no attribute '{name}'{hint}")]
    AttributeNotFound {
        /// The resource type name.
        resource: &'static str,
        /// The attribute that was read.
        name: String,
        /// Lazy or list-created context.
        hint: AttributeHint,
    },

    /// A path placeholder could not be filled from the parent.
    #[error(
        "Cannot resolve path for {resource}: parent attribute '{parent_attr}' \
         for placeholder '{{{placeholder}}}' is missing"
    )]
    MissingParentAttribute {
        /// The resource type name.
        resource: &'static str,
        /// The template placeholder.
        placeholder: &'static str,
        /// The parent attribute bound to it.
        parent_attr: &'static str,
    },

    /// Client-side validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A `get` request failed.
    #[error("Failed to get {resource}: {source}")]
    Get {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A `list` request failed.
    #[error("Failed to list {resource}: {source}")]
    List {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A `create` request failed.
    #[error("Failed to create {resource}: {source}")]
    Create {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// An `update` request failed.
    #[error("Failed to update {resource}: {source}")]
    Update {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A `delete` request failed.
    #[error("Failed to delete {resource}: {source}")]
    Delete {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A `set` request failed.
    #[error("Failed to set {resource}: {source}")]
    Set {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A `head` request failed.
    #[error("Failed to fetch headers for {resource}: {source}")]
    Head {
        /// The resource type name.
        resource: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// A custom action request failed.
    #[error("Failed to {action} {resource}: {source}")]
    Action {
        /// The resource type name.
        resource: &'static str,
        /// The action name (e.g. "subscribe").
        action: &'static str,
        /// The transport error.
        source: HttpError,
    },

    /// The server rejected the credentials (HTTP 401).
    #[error("Authentication failed during {operation} of {resource}: {source}")]
    Authentication {
        /// The resource type name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: Operation,
        /// The transport error.
        source: HttpError,
    },
}

impl ResourceError {
    /// Wraps a transport error into the variant for `operation`.
    ///
    /// A 401 response maps to [`ResourceError::Authentication`] regardless
    /// of the operation.
    #[must_use]
    pub fn from_http(operation: Operation, resource: &'static str, source: HttpError) -> Self {
        if source.status_code() == Some(401) {
            return Self::Authentication {
                resource,
                operation,
                source,
            };
        }
        match operation {
            Operation::Get => Self::Get { resource, source },
            Operation::List => Self::List { resource, source },
            Operation::Create => Self::Create { resource, source },
            Operation::Update => Self::Update { resource, source },
            Operation::Delete => Self::Delete { resource, source },
            Operation::Set => Self::Set { resource, source },
            Operation::Head => Self::Head { resource, source },
            Operation::Action(action) => Self::Action {
                resource,
                action,
                source,
            },
        }
    }

    /// Returns the underlying transport error, if any.
    #[must_use]
    pub const fn http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Get { source, .. }
            | Self::List { source, .. }
            | Self::Create { source, .. }
            | Self::Update { source, .. }
            | Self::Delete { source, .. }
            | Self::Set { source, .. }
            | Self::Head { source, .. }
            | Self::Action { source, .. }
            | Self::Authentication { source, .. } => Some(source),
            Self::MalformedResponse { .. }
            | Self::AttributeNotFound { .. }
            | Self::MissingParentAttribute { .. }
            | Self::Validation(_) => None,
        }
    }

    /// Returns the HTTP status code of the failed request, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.http_error().and_then(HttpError::status_code)
    }

    /// Returns the raw response body of the failed request, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        self.http_error().and_then(HttpError::response_body)
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
