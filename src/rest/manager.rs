//! Resource managers.
//!
//! A [`RestManager`] binds a [`ResourceDef`] to a transport and, for nested
//! resources, to the parent object it was created from. The collection path
//! is resolved once, at construction, from the parent's attributes; later
//! changes to the parent do not affect an existing manager.
//!
//! Typed managers wrap a `RestManager` and implement [`Manager`] plus the
//! capability mixins (`GetMixin`, `ListMixin`, ...) the endpoint supports.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::clients::{HttpError, HttpRequestBuilder, HttpResponse, Transport};
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::object::{RestObject, RestResource};
use crate::rest::path::{build_path, item_path, EncodedId, ResourceDef};

/// Untyped manager state shared by every typed manager.
///
/// Cloning is cheap: the transport is reference-counted and the resolved
/// path is a short string.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use gitlab_api::rest::{RestManager, ResourceDef};
/// use gitlab_api::testing::RecordingTransport;
///
/// const PROJECT: ResourceDef = ResourceDef::new("Project", "/projects");
///
/// let manager = RestManager::new(Arc::new(RecordingTransport::new()), &PROJECT, None).unwrap();
/// assert_eq!(manager.path(), "/projects");
/// ```
#[derive(Clone, Debug)]
pub struct RestManager {
    transport: Arc<dyn Transport>,
    def: &'static ResourceDef,
    path: String,
    parent_attrs: Map<String, Value>,
}

impl RestManager {
    /// Creates a manager, resolving the path template against `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the definition
    /// binds a placeholder and `parent` is `None`, or lacks the bound
    /// attribute. No request is made.
    pub fn new(
        transport: Arc<dyn Transport>,
        def: &'static ResourceDef,
        parent: Option<&RestObject>,
    ) -> Result<Self, ResourceError> {
        let mut parent_attrs = Map::new();
        let mut ids = Vec::with_capacity(def.from_parent_attrs.len());

        for binding in def.from_parent_attrs {
            let missing = || ResourceError::MissingParentAttribute {
                resource: def.name,
                placeholder: binding.placeholder,
                parent_attr: binding.parent_attr,
            };
            let value = parent
                .and_then(|parent| parent.get(binding.parent_attr))
                .filter(|value| !value.is_null())
                .ok_or_else(missing)?;
            let id = EncodedId::from_value(value).ok_or_else(missing)?;

            parent_attrs.insert(binding.placeholder.to_string(), value.clone());
            ids.push((binding.placeholder, id));
        }

        Ok(Self {
            transport,
            def,
            path: build_path(def.path, &ids),
            parent_attrs,
        })
    }

    /// Creates a manager for a top-level resource.
    ///
    /// `def` must not bind any placeholder to a parent attribute; use
    /// [`new`](Self::new) for nested resources.
    #[must_use]
    pub fn top_level(transport: Arc<dyn Transport>, def: &'static ResourceDef) -> Self {
        debug_assert!(
            def.from_parent_attrs.is_empty(),
            "{} is nested and needs a parent",
            def.name
        );
        Self {
            transport,
            def,
            path: def.path.to_string(),
            parent_attrs: Map::new(),
        }
    }

    /// Returns the resolved collection path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the resource definition.
    #[must_use]
    pub const fn def(&self) -> &'static ResourceDef {
        self.def
    }

    /// Returns the transport requests are sent through.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the values bound from the parent, keyed by placeholder.
    #[must_use]
    pub const fn parent_attrs(&self) -> &Map<String, Value> {
        &self.parent_attrs
    }

    /// Returns the path of one item of the collection.
    #[must_use]
    pub fn item_path(&self, id: &EncodedId) -> String {
        item_path(&self.path, id)
    }

    /// Sends a request, wrapping failures into the error for `operation`.
    pub(crate) async fn send(
        &self,
        operation: Operation,
        request: HttpRequestBuilder,
    ) -> Result<HttpResponse, ResourceError> {
        let result = match request.build() {
            Ok(request) => {
                debug!(
                    resource = self.def.name,
                    %operation,
                    method = %request.http_method,
                    path = %request.path,
                    "Sending resource request"
                );
                self.transport.send(request).await
            }
            Err(e) => Err(HttpError::from(e)),
        };

        result.map_err(|source| ResourceError::from_http(operation, self.def.name, source))
    }

    /// Wraps a server mapping into a populated object.
    pub(crate) fn wrap<T: RestResource>(&self, body: Value) -> Result<T, ResourceError> {
        let attrs = self.expect_object(body)?;
        Ok(T::from_object(RestObject::new(self, attrs)))
    }

    /// Wraps a list response into objects flagged as list-created.
    pub(crate) fn wrap_list<T: RestResource>(&self, body: Value) -> Result<Vec<T>, ResourceError> {
        let Value::Array(items) = body else {
            return Err(ResourceError::MalformedResponse {
                resource: self.def.name,
                expected: "a JSON array",
            });
        };

        items
            .into_iter()
            .map(|item| {
                let attrs = self.expect_object(item)?;
                Ok(T::from_object(RestObject::from_list(self, attrs)))
            })
            .collect()
    }

    pub(crate) fn expect_object(&self, body: Value) -> Result<Map<String, Value>, ResourceError> {
        match body {
            Value::Object(attrs) => Ok(attrs),
            _ => Err(ResourceError::MalformedResponse {
                resource: self.def.name,
                expected: "a JSON object",
            }),
        }
    }
}

/// A typed manager.
///
/// Implementors wrap a [`RestManager`] and name the object type they
/// produce. Capability mixins are implemented on top of this trait.
pub trait Manager {
    /// The object type produced by this manager.
    type Object: RestResource;

    /// Returns the untyped manager state.
    fn rest_manager(&self) -> &RestManager;
}

// Verify RestManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestManager>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::path::ParentBinding;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    const PROJECT: ResourceDef = ResourceDef::new("Project", "/projects");
    const NOTE: ResourceDef = ResourceDef {
        from_parent_attrs: &[
            ParentBinding::new("project_id", "project_id"),
            ParentBinding::new("issue_iid", "iid"),
        ],
        ..ResourceDef::new("ProjectIssueNote", "/projects/{project_id}/issues/{issue_iid}/notes")
    };

    fn transport() -> Arc<RecordingTransport> {
        Arc::new(RecordingTransport::new())
    }

    fn issue(transport: &Arc<RecordingTransport>, attrs: Value) -> RestObject {
        let manager = RestManager::new(transport.clone(), &PROJECT, None).unwrap();
        RestObject::new(&manager, attrs.as_object().cloned().unwrap())
    }

    #[test]
    fn test_path_is_resolved_from_parent() {
        let transport = transport();
        let parent = issue(&transport, json!({"project_id": "group/app", "iid": 3}));

        let notes = RestManager::new(transport.clone(), &NOTE, Some(&parent)).unwrap();

        assert_eq!(notes.path(), "/projects/group%2Fapp/issues/3/notes");
        assert_eq!(notes.parent_attrs()["project_id"], json!("group/app"));
        assert_eq!(notes.parent_attrs()["issue_iid"], json!(3));
        assert_eq!(notes.item_path(&EncodedId::from(9)), "/projects/group%2Fapp/issues/3/notes/9");
    }

    #[test]
    fn test_missing_parent_attribute_fails_before_io() {
        let transport = transport();
        let parent = issue(&transport, json!({"project_id": 1}));

        let err = RestManager::new(transport.clone(), &NOTE, Some(&parent)).unwrap_err();

        assert!(matches!(
            err,
            ResourceError::MissingParentAttribute {
                placeholder: "issue_iid",
                parent_attr: "iid",
                ..
            }
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_missing_parent_fails() {
        let err = RestManager::new(transport(), &NOTE, None).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::MissingParentAttribute { placeholder: "project_id", .. }
        ));
    }

    #[test]
    fn test_null_parent_attribute_counts_as_missing() {
        let transport = transport();
        let parent = issue(&transport, json!({"project_id": 1, "iid": null}));
        assert!(RestManager::new(transport.clone(), &NOTE, Some(&parent)).is_err());
    }

    #[test]
    fn test_path_is_not_recomputed_after_parent_changes() {
        let transport = transport();
        let mut parent = issue(&transport, json!({"project_id": 1, "iid": 2}));
        let notes = RestManager::new(transport.clone(), &NOTE, Some(&parent)).unwrap();

        parent.write("iid", json!(99));

        assert_eq!(notes.path(), "/projects/1/issues/2/notes");
    }

    #[test]
    fn test_top_level_manager() {
        let manager = RestManager::top_level(transport(), &PROJECT);
        assert_eq!(manager.path(), "/projects");
        assert!(manager.parent_attrs().is_empty());
    }

    #[test]
    fn test_wrap_rejects_non_objects() {
        let manager = RestManager::new(transport(), &PROJECT, None).unwrap();

        let err = manager.wrap::<RestObject>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ResourceError::MalformedResponse { expected: "a JSON object", .. }));

        let err = manager.wrap_list::<RestObject>(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, ResourceError::MalformedResponse { expected: "a JSON array", .. }));
    }

    #[test]
    fn test_wrap_list_flags_objects() {
        let manager = RestManager::new(transport(), &PROJECT, None).unwrap();
        let objects = manager
            .wrap_list::<RestObject>(json!([{"id": 1}, {"id": 2}]))
            .unwrap();

        assert_eq!(objects.len(), 2);
        assert!(objects.iter().all(RestObject::created_from_list));
    }
}
