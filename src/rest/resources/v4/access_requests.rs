//! Requests to join a project or group.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    AccessRequestApproveMixin, CreateMixin, DeleteMixin, ListMixin, Manager, ObjectDeleteMixin,
    ParentBinding, ResourceDef, ResourceError, RestManager, RestObject, RestResource,
};

use super::{Group, Project};

/// `/projects/{project_id}/access_requests`
pub const PROJECT_ACCESS_REQUEST: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    repr_attr: Some("username"),
    ..ResourceDef::new(
        "ProjectAccessRequest",
        "/projects/{project_id}/access_requests",
    )
};

/// `/groups/{group_id}/access_requests`
pub const GROUP_ACCESS_REQUEST: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    repr_attr: Some("username"),
    ..ResourceDef::new("GroupAccessRequest", "/groups/{group_id}/access_requests")
};

/// A pending access request, identified by the requesting user's id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessRequest(RestObject);

impl RestResource for AccessRequest {
    fn from_object(object: RestObject) -> Self {
        Self(object)
    }

    fn object(&self) -> &RestObject {
        &self.0
    }

    fn object_mut(&mut self) -> &mut RestObject {
        &mut self.0
    }
}

impl Deref for AccessRequest {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AccessRequest {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ObjectDeleteMixin for AccessRequest {}
impl AccessRequestApproveMixin for AccessRequest {}

/// Manages the access requests of a project or a group.
///
/// `create` requests access for the authenticated user and takes no
/// attributes.
#[derive(Clone, Debug)]
pub struct AccessRequestManager(RestManager);

impl AccessRequestManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_ACCESS_REQUEST).map(Self)
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_ACCESS_REQUEST).map(Self)
    }
}

impl Manager for AccessRequestManager {
    type Object = AccessRequest;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl ListMixin for AccessRequestManager {}
impl CreateMixin for AccessRequestManager {}
impl DeleteMixin for AccessRequestManager {}
