//! REST resource layer for the GitLab API.
//!
//! This module turns JSON endpoints into managers and objects:
//!
//! - **[`ResourceDef`]**: declarative metadata for a resource type (path
//!   template, parent bindings, id attribute, create/update contracts,
//!   attribute types)
//! - **[`RestManager`]**: a collection endpoint with its path resolved from a
//!   parent object
//! - **[`RestObject`]**: one remote object; local changes shadow the server
//!   state until saved
//! - **Mixins**: one trait per operation ([`GetMixin`], [`ListMixin`],
//!   [`SaveMixin`], ...), opted into per resource
//! - **[`RestObjectList`]**: lazy iteration over paginated lists
//! - **[`ResourceError`]**: operation-specific errors
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_api::rest::resources::ProjectManager;
//! use gitlab_api::rest::{CreateMixin, GetMixin, ListMixin, ListParams, SaveMixin};
//! use gitlab_api::{GitlabConfig, HttpClient};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpClient::new(&GitlabConfig::from_env()?)?);
//! let projects = ProjectManager::new(client);
//!
//! let mut project = projects.get("group/app").await?;
//! project.write("description", "New description");
//! project.save().await?;
//!
//! let issues = project.issues()?;
//! let issue = issues.create(json!({"title": "Broken build"})).await?;
//! println!("{issue}");
//!
//! let mut open = issues
//!     .iter(ListParams::new().filter("state", "opened"))
//!     .await?;
//! while let Some(issue) = open.next().await? {
//!     println!("{issue}");
//! }
//! # Ok(())
//! # }
//! ```

mod attributes;
mod errors;
mod manager;
mod mixins;
mod object;
mod pagination;
mod path;
mod response;
mod types;

pub mod resources;

// Public exports
pub use attributes::AttributeStore;
pub use errors::{AttributeHint, Operation, ResourceError, ValidationError};
pub use manager::{Manager, RestManager};
pub use mixins::{
    AccessRequestApproveMixin, BadgeRenderMixin, CreateMixin, DeleteMixin, GetMixin,
    GetWithoutIdMixin, HeadMixin, ListMixin, ListParams, ObjectDeleteMixin, ParticipantsMixin,
    PromoteMixin, RefreshMixin, SaveMixin, SetMixin, SubscribableMixin, TimeTrackingMixin,
    TodoMixin, UpdateMixin, DEVELOPER_ACCESS,
};
pub use object::{ObjectState, RestObject, RestResource};
pub use pagination::RestObjectList;
pub use path::{build_path, item_path, EncodedId, ParentBinding, ResourceDef, UpdateMethod};
pub use response::ResourceResponse;
pub use types::{AttributeType, RequiredOptional};
