//! Project and group badges.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    BadgeRenderMixin, CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin,
    ParentBinding, RequiredOptional, ResourceDef, ResourceError, RestManager, RestObject,
    RestResource, SaveMixin, UpdateMixin,
};

use super::{Group, Project};

const BADGE_CREATE: RequiredOptional = RequiredOptional::new(&["link_url", "image_url"], &["name"]);
const BADGE_UPDATE: RequiredOptional =
    RequiredOptional::new(&[], &["link_url", "image_url", "name"]);

/// `/projects/{project_id}/badges`
pub const PROJECT_BADGE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    create_attrs: BADGE_CREATE,
    update_attrs: BADGE_UPDATE,
    ..ResourceDef::new("ProjectBadge", "/projects/{project_id}/badges")
};

/// `/groups/{group_id}/badges`
pub const GROUP_BADGE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    create_attrs: BADGE_CREATE,
    update_attrs: BADGE_UPDATE,
    ..ResourceDef::new("GroupBadge", "/groups/{group_id}/badges")
};

/// A badge shown on the project or group page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Badge(RestObject);

impl RestResource for Badge {
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

impl Deref for Badge {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Badge {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Badge {}
impl ObjectDeleteMixin for Badge {}

/// Manages the badges of a project or a group.
#[derive(Clone, Debug)]
pub struct BadgeManager(RestManager);

impl BadgeManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_BADGE).map(Self)
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_BADGE).map(Self)
    }
}

impl Manager for BadgeManager {
    type Object = Badge;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for BadgeManager {}
impl ListMixin for BadgeManager {}
impl CreateMixin for BadgeManager {}
impl UpdateMixin for BadgeManager {}
impl DeleteMixin for BadgeManager {}
impl BadgeRenderMixin for BadgeManager {}
