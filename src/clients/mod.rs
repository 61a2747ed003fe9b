//! HTTP transport layer for GitLab API communication.
//!
//! # Overview
//!
//! - [`Transport`]: The seam managers send requests through
//! - [`HttpClient`]: The reqwest-backed transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response, including [`PaginationInfo`]
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`DataType`]: Body encodings (JSON or multipart)
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retried when `obey_rate_limit` is set, waiting
//!   for `Retry-After` or an exponential backoff
//! - **500, 502, 503, 504, 520-530**: Retried only when
//!   `retry_transient_errors` is set
//! - **Other errors**: Returned immediately
//!
//! The number of retries defaults to
//! [`DEFAULT_MAX_RETRIES`](crate::config::DEFAULT_MAX_RETRIES).

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_BASE_DELAY, SDK_VERSION};
pub use http_request::{DataType, FilePart, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, PaginationInfo};
pub use transport::{ListDefaults, Transport};

pub(crate) use http_request::json_kind;
