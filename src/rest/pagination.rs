//! Lazy traversal of paginated list endpoints.
//!
//! [`RestObjectList`] holds one page of raw records at a time and fetches
//! the next page only when the current one is drained. Two pagination
//! styles are supported:
//!
//! - **Offset**: the server sends `X-Next-Page`, or `X-Page` below
//!   `X-Total-Pages`; the next request repeats the original query with
//!   `page=<n>`. `X-Total` gives the record count.
//! - **Keyset**: the server sends only a `Link: <url>; rel="next"` header;
//!   the next request follows that URL verbatim. The record count is
//!   unknown.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitlab_api::rest::{ListMixin, ListParams};
//!
//! let mut projects = gl.projects().iter(ListParams::new().per_page(50)).await?;
//! println!("{:?} projects", projects.len());
//!
//! while let Some(project) = projects.next().await? {
//!     println!("{project}");
//! }
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::debug;

use crate::clients::{HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, PaginationInfo};
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::manager::RestManager;
use crate::rest::object::{RestObject, RestResource};

/// A forward-only, single-use sequence of objects spanning several pages.
///
/// Once [`next`](Self::next) has returned `Ok(None)` the list is exhausted
/// and every later call returns `Ok(None)` without a request. To start
/// over, call the manager again.
#[derive(Debug)]
pub struct RestObjectList<T> {
    manager: RestManager,
    path: String,
    query: Vec<(String, String)>,
    records: VecDeque<Map<String, Value>>,
    pagination: PaginationInfo,
    exhausted: bool,
    _object: PhantomData<fn() -> T>,
}

#[allow(clippy::len_without_is_empty)]
impl<T: RestResource> RestObjectList<T> {
    /// Builds the list from the first page.
    pub(crate) fn new(
        manager: RestManager,
        path: String,
        query: Vec<(String, String)>,
        first_page: HttpResponse,
    ) -> Result<Self, ResourceError> {
        let mut list = Self {
            manager,
            path,
            query,
            records: VecDeque::new(),
            pagination: PaginationInfo::default(),
            exhausted: false,
            _object: PhantomData,
        };
        list.accept_page(first_page)?;
        Ok(list)
    }

    /// Returns the next object, fetching the next page when needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::List`] if a page request fails, or
    /// [`ResourceError::MalformedResponse`] if a page is not an array of
    /// objects. A rejected page yields none of its records. A failed fetch
    /// leaves the cursor in place, so the call can be repeated.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<Option<T>, ResourceError> {
        loop {
            if let Some(attrs) = self.records.pop_front() {
                return Ok(Some(T::from_object(RestObject::from_list(
                    &self.manager,
                    attrs,
                ))));
            }

            if self.exhausted {
                return Ok(None);
            }

            let Some(request) = self.next_request() else {
                self.exhausted = true;
                return Ok(None);
            };

            let response = self.manager.send(Operation::List, request).await?;
            self.accept_page(response)?;
        }
    }

    /// Drains the remaining objects into a vector.
    ///
    /// # Errors
    ///
    /// See [`next`](Self::next).
    pub async fn try_collect(mut self) -> Result<Vec<T>, ResourceError> {
        let mut objects = Vec::with_capacity(self.records.len());
        while let Some(object) = self.next().await? {
            objects.push(object);
        }
        Ok(objects)
    }

    /// Returns the total number of records across all pages.
    ///
    /// Only offset pagination reports a total. Keyset pagination, and offset
    /// pagination over very large collections, return `None`.
    #[must_use]
    pub const fn len(&self) -> Option<u64> {
        self.pagination.total
    }

    /// Returns the number of the page currently held.
    #[must_use]
    pub const fn current_page(&self) -> Option<u64> {
        self.pagination.page
    }

    /// Returns the number of the next offset page, if there is one.
    #[must_use]
    pub const fn next_page(&self) -> Option<u64> {
        self.pagination.following_page()
    }

    #[must_use]
    pub const fn prev_page(&self) -> Option<u64> {
        self.pagination.prev_page
    }

    #[must_use]
    pub const fn per_page(&self) -> Option<u64> {
        self.pagination.per_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> Option<u64> {
        self.pagination.total_pages
    }

    /// Returns `true` once the last page has been drained.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn next_request(&self) -> Option<HttpRequestBuilder> {
        if let Some(page) = self.pagination.following_page() {
            let mut query: Vec<(String, String)> = self
                .query
                .iter()
                .filter(|(key, _)| key != "page")
                .cloned()
                .collect();
            query.push(("page".to_string(), page.to_string()));
            return Some(HttpRequest::builder(HttpMethod::Get, self.path.as_str()).query(query));
        }

        self.pagination
            .next_url
            .as_deref()
            .map(|url| HttpRequest::builder(HttpMethod::Get, url))
    }

    fn accept_page(&mut self, response: HttpResponse) -> Result<(), ResourceError> {
        let Value::Array(records) = response.body else {
            return Err(ResourceError::MalformedResponse {
                resource: self.manager.def().name,
                expected: "a JSON array",
            });
        };

        let records = records
            .into_iter()
            .map(|record| self.manager.expect_object(record))
            .collect::<Result<VecDeque<_>, _>>()?;

        debug!(
            resource = self.manager.def().name,
            page = ?response.pagination.page,
            records = records.len(),
            "Fetched list page"
        );

        self.records = records;
        self.pagination = response.pagination;
        Ok(())
    }
}

// Verify RestObjectList is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestObjectList<RestObject>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::path::ResourceDef;
    use crate::testing::RecordingTransport;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    const FAKE: ResourceDef = ResourceDef::new("FakeObject", "/tests");

    fn page(body: Value, headers: &[(&str, &str)]) -> HttpResponse {
        let headers: HashMap<String, Vec<String>> = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect();
        HttpResponse::new(200, headers, body)
    }

    #[tokio::test]
    async fn test_offset_pages_reuse_query() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with_headers(
            HttpMethod::Get,
            "/tests",
            200,
            &[("X-Page", "2"), ("X-Total", "2")],
            json!([{"id": 2}]),
        );
        let manager = RestManager::new(transport.clone(), &FAKE, None).unwrap();

        let first = page(
            json!([{"id": 1}]),
            &[("x-page", "1"), ("x-next-page", "2"), ("x-total", "2")],
        );
        let query = vec![
            ("per_page".to_string(), "1".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        let mut list: RestObjectList<RestObject> =
            RestObjectList::new(manager, "/tests".to_string(), query, first).unwrap();

        assert_eq!(list.len(), Some(2));
        assert_eq!(list.next().await.unwrap().unwrap().id(), Some(&json!(1)));
        assert_eq!(transport.request_count(), 0);

        assert_eq!(list.next().await.unwrap().unwrap().id(), Some(&json!(2)));
        let request = transport.last_request().unwrap();
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("per_page"), Some("1"));
        assert_eq!(request.query.iter().filter(|(k, _)| k == "page").count(), 1);

        assert!(list.next().await.unwrap().is_none());
        assert!(list.next().await.unwrap().is_none());
        assert!(list.is_exhausted());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_keyset_follows_next_url() {
        let next = "https://gitlab.example.com/api/v4/tests?cursor=abc";
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpMethod::Get, next, 200, json!([{"id": 2}]));
        let manager = RestManager::new(transport.clone(), &FAKE, None).unwrap();

        let link = format!("<{next}>; rel=\"next\"");
        let first = page(json!([{"id": 1}]), &[("link", link.as_str())]);
        let mut list: RestObjectList<RestObject> =
            RestObjectList::new(manager, "/tests".to_string(), vec![], first).unwrap();

        assert_eq!(list.len(), None);
        let objects = list.try_collect().await.unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(transport.last_request().unwrap().path, next);
    }

    #[tokio::test]
    async fn test_objects_are_flagged_as_list_created() {
        let manager = RestManager::new(Arc::new(RecordingTransport::new()), &FAKE, None).unwrap();
        let mut list: RestObjectList<RestObject> = RestObjectList::new(
            manager,
            "/tests".to_string(),
            vec![],
            page(json!([{"id": 1}]), &[]),
        )
        .unwrap();

        let object = list.next().await.unwrap().unwrap();
        assert!(object.created_from_list());
    }

    #[tokio::test]
    async fn test_page_with_non_object_record_yields_nothing() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_with_headers(
            HttpMethod::Get,
            "/tests",
            200,
            &[("X-Page", "2"), ("X-Total-Pages", "2")],
            json!([{"id": 2}, "oops", {"id": 3}]),
        );
        let manager = RestManager::new(transport.clone(), &FAKE, None).unwrap();
        let first = page(
            json!([{"id": 1}]),
            &[("x-page", "1"), ("x-total-pages", "2")],
        );
        let mut list: RestObjectList<RestObject> =
            RestObjectList::new(manager, "/tests".to_string(), vec![], first).unwrap();

        assert_eq!(list.next().await.unwrap().unwrap().id(), Some(&json!(1)));
        let err = list.next().await.unwrap_err();
        assert!(matches!(err, ResourceError::MalformedResponse { .. }));

        // The rejected page is not consumed; the next call asks for it again.
        assert!(list.next().await.is_err());
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.requests()[1].query_value("page"), Some("2"));
    }

    #[test]
    fn test_non_array_page_is_rejected() {
        let manager = RestManager::new(Arc::new(RecordingTransport::new()), &FAKE, None).unwrap();
        let result: Result<RestObjectList<RestObject>, _> = RestObjectList::new(
            manager,
            "/tests".to_string(),
            vec![],
            page(json!({"id": 1}), &[]),
        );
        assert!(matches!(result, Err(ResourceError::MalformedResponse { .. })));
    }
}
