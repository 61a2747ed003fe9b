//! The transport seam between resource managers and the network.

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::PaginationMode;

/// Listing defaults a transport contributes to every list call.
///
/// Filters passed to a list call take precedence over these.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListDefaults {
    /// Default `per_page`.
    pub per_page: Option<u32>,
    /// Default `order_by`.
    pub order_by: Option<String>,
    /// Default `pagination` mode.
    pub pagination: Option<PaginationMode>,
}

/// Sends requests to a GitLab server.
///
/// [`HttpClient`](crate::HttpClient) is the production implementation;
/// [`RecordingTransport`](crate::testing::RecordingTransport) replays
/// scripted responses in tests. Managers hold the transport as
/// `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends one request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] for non-2xx responses, and the other
    /// [`HttpError`] variants for validation, retry, or network failures.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;

    /// Returns the listing defaults merged into list calls.
    fn list_defaults(&self) -> ListDefaults {
        ListDefaults::default()
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()?;
        self.send(request).await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_post(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = with_json_body(HttpRequest::builder(HttpMethod::Post, path), body)
            .query(query)
            .build()?;
        self.send(request).await
    }

    /// Sends a PUT request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_put(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = with_json_body(HttpRequest::builder(HttpMethod::Put, path), body)
            .query(query)
            .build()?;
        self.send(request).await
    }

    /// Sends a PATCH request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_patch(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = with_json_body(HttpRequest::builder(HttpMethod::Patch, path), body)
            .query(query)
            .build()?;
        self.send(request).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_delete(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .query(query)
            .build()?;
        self.send(request).await
    }

    /// Sends a HEAD request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    async fn http_head(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Head, path)
            .query(query)
            .build()?;
        self.send(request).await
    }
}

fn with_json_body(
    builder: crate::clients::HttpRequestBuilder,
    body: Option<Value>,
) -> crate::clients::HttpRequestBuilder {
    match body {
        Some(body) => builder.body(body).body_type(DataType::Json),
        None => builder,
    }
}
