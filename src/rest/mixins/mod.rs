//! Capability mixins.
//!
//! Each mixin adds one operation. A typed manager opts into the operations
//! its endpoint supports by implementing the manager-level traits; a typed
//! object does the same with the object-level traits:
//!
//! | Trait | Level | Request |
//! |-------|-------|---------|
//! | [`GetMixin`] | manager | `GET {path}/{id}` |
//! | [`GetWithoutIdMixin`] | manager | `GET {path}` |
//! | [`ListMixin`] | manager | `GET {path}?…` |
//! | [`CreateMixin`] | manager | `POST {path}` |
//! | [`UpdateMixin`] | manager | `PUT {path}/{id}` (or `POST`/`PATCH`) |
//! | [`DeleteMixin`] | manager | `DELETE {path}/{id}` |
//! | [`SetMixin`] | manager | `PUT {path}/{key}` |
//! | [`HeadMixin`] | manager | `HEAD {path}/{id}` |
//! | [`BadgeRenderMixin`] | manager | `GET {path}/render` |
//! | [`SaveMixin`] | object | update with the local changes |
//! | [`ObjectDeleteMixin`] | object | delete this object |
//! | [`RefreshMixin`] | object | re-fetch this object |
//! | [`SubscribableMixin`], [`TodoMixin`], [`TimeTrackingMixin`], [`ParticipantsMixin`], [`AccessRequestApproveMixin`], [`PromoteMixin`] | object | `{object path}/{action}` |
//!
//! All operations are provided methods; implementing a mixin is an empty
//! `impl` block.
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::rest::{
//!     DeleteMixin, GetMixin, Manager, RestManager, RestObject, ResourceDef,
//! };
//!
//! const WIDGET: ResourceDef = ResourceDef::new("Widget", "/widgets");
//!
//! struct WidgetManager(RestManager);
//!
//! impl Manager for WidgetManager {
//!     type Object = RestObject;
//!
//!     fn rest_manager(&self) -> &RestManager {
//!         &self.0
//!     }
//! }
//!
//! impl GetMixin for WidgetManager {}
//! impl DeleteMixin for WidgetManager {}
//! ```

mod actions;
mod crud;
mod list;
mod object;

pub use actions::{
    AccessRequestApproveMixin, BadgeRenderMixin, ParticipantsMixin, PromoteMixin,
    SubscribableMixin, TimeTrackingMixin, TodoMixin, DEVELOPER_ACCESS,
};
pub use crud::{
    CreateMixin, DeleteMixin, GetMixin, GetWithoutIdMixin, HeadMixin, SetMixin, UpdateMixin,
};
pub use list::{ListMixin, ListParams};
pub use object::{ObjectDeleteMixin, RefreshMixin, SaveMixin};

use serde_json::{Map, Value};

use crate::clients::{json_kind, DataType, FilePart, HttpMethod, HttpRequest, HttpRequestBuilder};
use crate::rest::errors::{Operation, ResourceError, ValidationError};
use crate::rest::manager::RestManager;
use crate::rest::object::RestObject;
use crate::rest::types::split_files;

/// Turns caller data into an attribute map; `null` counts as empty.
fn into_attrs(data: Value) -> Result<Map<String, Value>, ValidationError> {
    match data {
        Value::Object(attrs) => Ok(attrs),
        Value::Null => Ok(Map::new()),
        other => Err(ValidationError::InvalidData {
            found: json_kind(&other),
        }),
    }
}

/// Builds a request carrying attribute data, as JSON or, when file
/// attributes are present, as multipart form data.
fn payload_request(
    method: HttpMethod,
    path: &str,
    data: Map<String, Value>,
    files: Vec<FilePart>,
) -> HttpRequestBuilder {
    let request = HttpRequest::builder(method, path).body(Value::Object(data));
    if files.is_empty() {
        request.body_type(DataType::Json)
    } else {
        files.into_iter().fold(request, HttpRequestBuilder::file)
    }
}

/// Validates and sends an update, returning the server's mapping.
pub(crate) async fn send_update(
    manager: &RestManager,
    path: &str,
    data: Value,
) -> Result<Map<String, Value>, ResourceError> {
    let def = manager.def();
    let data = into_attrs(data)?;
    def.update_attrs.validate(&data, def.id_attr)?;
    let (data, files) = split_files(data, def.types)?;

    let response = manager
        .send(
            Operation::Update,
            payload_request(def.update_method.http_method(), path, data, files),
        )
        .await?;

    manager.expect_object(response.body)
}

/// Sends `{object path}/{action}`.
pub(crate) async fn object_action(
    object: &RestObject,
    action: &'static str,
    method: HttpMethod,
    body: Option<Value>,
) -> Result<Value, ResourceError> {
    let path = format!("{}/{action}", object.path());
    let request = match body {
        Some(body) => HttpRequest::builder(method, path)
            .body(body)
            .body_type(DataType::Json),
        None => HttpRequest::builder(method, path),
    };

    let response = object
        .manager()
        .send(Operation::Action(action), request)
        .await?;
    Ok(response.body)
}
