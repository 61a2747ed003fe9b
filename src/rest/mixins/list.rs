//! Listing: one page, every page, or a lazy iterator.

use serde_json::{Map, Value};
use tracing::warn;

use crate::clients::{HttpMethod, HttpRequest};
use crate::config::PaginationMode;
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::manager::{Manager, RestManager};
use crate::rest::pagination::RestObjectList;
use crate::rest::response::ResourceResponse;
use crate::rest::types::to_query;

/// Filters and options of a list call.
///
/// Filters set here win over the transport's listing defaults
/// (`per_page`, `order_by`, `pagination`).
///
/// # Example
///
/// ```rust
/// use gitlab_api::rest::ListParams;
/// use serde_json::json;
///
/// let params = ListParams::new()
///     .filter("labels", json!(["bug", "ui"]))
///     .filter("state", "opened")
///     .per_page(50)
///     .path("/snippets/public");
///
/// assert_eq!(params.filters()["per_page"], json!(50));
/// assert_eq!(params.custom_path(), Some("/snippets/public"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    filters: Map<String, Value>,
    path: Option<String>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter. Attribute types of the resource apply on the wire.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Requests a specific page.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.filter("page", page)
    }

    #[must_use]
    pub fn per_page(self, per_page: u32) -> Self {
        self.filter("per_page", per_page)
    }

    #[must_use]
    pub fn order_by(self, order_by: impl Into<String>) -> Self {
        self.filter("order_by", order_by.into())
    }

    #[must_use]
    pub fn pagination(self, mode: PaginationMode) -> Self {
        self.filter("pagination", mode.as_str())
    }

    /// Lists from another endpoint that returns the same resource.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    #[must_use]
    pub fn custom_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the target path and the query, with defaults merged in.
    fn resolve(self, manager: &RestManager) -> (String, Vec<(String, String)>) {
        let Self { mut filters, path } = self;
        let defaults = manager.transport().list_defaults();

        if let Some(per_page) = defaults.per_page {
            filters
                .entry("per_page")
                .or_insert_with(|| Value::from(per_page));
        }
        if let Some(mode) = defaults.pagination {
            filters
                .entry("pagination")
                .or_insert_with(|| Value::from(mode.as_str()));
        }
        if let Some(order_by) = defaults.order_by {
            filters
                .entry("order_by")
                .or_insert_with(|| Value::from(order_by));
        }

        let path = path.unwrap_or_else(|| manager.path().to_string());
        (path, to_query(&filters, manager.def().types))
    }
}

/// List objects of the collection.
#[allow(async_fn_in_trait)]
pub trait ListMixin: Manager {
    /// Fetches one page.
    ///
    /// Logs a warning when the server reports more pages; use
    /// [`list_all`](Self::list_all) or [`iter`](Self::iter) to see them.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::List`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an array of
    /// objects.
    async fn list(
        &self,
        params: ListParams,
    ) -> Result<ResourceResponse<Vec<Self::Object>>, ResourceError> {
        let manager = self.rest_manager();
        let (path, query) = params.resolve(manager);

        let response = manager
            .send(
                Operation::List,
                HttpRequest::builder(HttpMethod::Get, path).query(query),
            )
            .await?;

        let request_id = response.request_id().map(String::from);
        let pagination = response.pagination.clone();
        let objects = manager.wrap_list(response.body)?;

        if pagination.has_next() {
            warn!(
                resource = manager.def().name,
                returned = objects.len(),
                total = ?pagination.total,
                "list() returned a single page of a larger result; use list_all() or iter() to fetch every page"
            );
        }

        Ok(ResourceResponse::new(objects, pagination, request_id))
    }

    /// Fetches every page.
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    async fn list_all(&self, params: ListParams) -> Result<Vec<Self::Object>, ResourceError> {
        self.iter(params).await?.try_collect().await
    }

    /// Fetches the first page and returns a lazy iterator over all pages.
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    async fn iter(&self, params: ListParams) -> Result<RestObjectList<Self::Object>, ResourceError> {
        let manager = self.rest_manager();
        let (path, query) = params.resolve(manager);

        let response = manager
            .send(
                Operation::List,
                HttpRequest::builder(HttpMethod::Get, path.as_str()).query(query.clone()),
            )
            .await?;

        RestObjectList::new(manager.clone(), path, query, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ListDefaults;
    use crate::rest::path::ResourceDef;
    use crate::rest::types::AttributeType;
    use crate::testing::RecordingTransport;
    use serde_json::json;
    use std::sync::Arc;

    const ISSUE: ResourceDef = ResourceDef {
        types: &[("labels", AttributeType::CommaSeparatedList)],
        ..ResourceDef::new("Issue", "/issues")
    };

    fn manager(defaults: ListDefaults) -> RestManager {
        let transport = RecordingTransport::new().with_list_defaults(defaults);
        RestManager::new(Arc::new(transport), &ISSUE, None).unwrap()
    }

    #[test]
    fn test_defaults_are_merged_and_call_filters_win() {
        let manager = manager(ListDefaults {
            per_page: Some(20),
            order_by: Some("created_at".to_string()),
            pagination: Some(PaginationMode::Keyset),
        });

        let (path, query) = ListParams::new()
            .per_page(5)
            .filter("labels", json!(["a", "b"]))
            .resolve(&manager);

        assert_eq!(path, "/issues");
        assert!(query.contains(&("per_page".to_string(), "5".to_string())));
        assert!(query.contains(&("order_by".to_string(), "created_at".to_string())));
        assert!(query.contains(&("pagination".to_string(), "keyset".to_string())));
        assert!(query.contains(&("labels".to_string(), "a,b".to_string())));
    }

    #[test]
    fn test_path_override() {
        let (path, query) = ListParams::new()
            .path("/issues/public")
            .resolve(&manager(ListDefaults::default()));

        assert_eq!(path, "/issues/public");
        assert!(query.is_empty());
    }
}
