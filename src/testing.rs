//! Test doubles for code built on [`Transport`].
//!
//! [`RecordingTransport`] replays scripted responses keyed by method and
//! path, and records every request it receives.
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::clients::{HttpMethod, Transport};
//! use gitlab_api::testing::RecordingTransport;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let transport = RecordingTransport::new();
//! transport.respond(HttpMethod::Get, "/projects/1", 200, json!({"id": 1}));
//!
//! let response = transport.http_get("/projects/1", vec![]).await.unwrap();
//! assert_eq!(response.body["id"], 1);
//! assert_eq!(transport.request_count(), 1);
//!
//! // Unscripted requests fail.
//! assert!(transport.http_get("/projects/2", vec![]).await.is_err());
//! # });
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{
    HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, ListDefaults, Transport,
};

/// Status code used for requests nothing was scripted for.
pub const UNEXPECTED_REQUEST_STATUS: u16 = 599;

type Key = (HttpMethod, String);

/// A [`Transport`] that answers from a script and records requests.
///
/// Responses for the same method and path are returned in the order they
/// were scripted; each is used once.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    script: Mutex<HashMap<Key, VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
    list_defaults: ListDefaults,
}

impl RecordingTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listing defaults reported to managers.
    #[must_use]
    pub fn with_list_defaults(mut self, defaults: ListDefaults) -> Self {
        self.list_defaults = defaults;
        self
    }

    /// Scripts a response with no headers.
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.respond_with_headers(method, path, status, &[], body);
    }

    /// Scripts a response with headers.
    pub fn respond_with_headers(
        &self,
        method: HttpMethod,
        path: &str,
        status: u16,
        headers: &[(&str, &str)],
        body: Value,
    ) {
        let mut header_map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            header_map
                .entry(name.to_lowercase())
                .or_default()
                .push((*value).to_string());
        }
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(HttpResponse::new(status, header_map, body));
    }

    /// Returns every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Returns `true` if every scripted response has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .all(VecDeque::is_empty)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let key = (request.http_method, request.path.clone());
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        let Some(response) = scripted else {
            return Err(HttpError::Response(HttpResponseError {
                code: UNEXPECTED_REQUEST_STATUS,
                message: format!("unexpected request: {} {}", key.0, key.1),
                body: String::new(),
                error_reference: None,
            }));
        };

        if response.is_ok() {
            return Ok(response);
        }

        let body = match &response.body {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let message = ["message", "error"]
            .iter()
            .filter_map(|field| response.body.get(*field))
            .last()
            .map_or_else(
                || body.clone(),
                |value| value.as_str().map_or_else(|| value.to_string(), String::from),
            );

        Err(HttpError::Response(HttpResponseError {
            code: response.code,
            message,
            body,
            error_reference: response.request_id().map(String::from),
        }))
    }

    fn list_defaults(&self) -> ListDefaults {
        self.list_defaults.clone()
    }
}
