//! Project and group milestones.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin,
    ParentBinding, PromoteMixin, RefreshMixin, RequiredOptional, ResourceDef, ResourceError,
    RestManager, RestObject, RestResource, SaveMixin, UpdateMixin,
};

use super::{Group, Project};

const MILESTONE_CREATE: RequiredOptional =
    RequiredOptional::new(&["title"], &["description", "due_date", "start_date"]);
const MILESTONE_UPDATE: RequiredOptional = RequiredOptional::new(
    &[],
    &["title", "description", "due_date", "start_date", "state_event"],
);
const MILESTONE_TYPES: &[(&str, AttributeType)] = &[("iids", AttributeType::Array)];

/// `/projects/{project_id}/milestones`
pub const PROJECT_MILESTONE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    repr_attr: Some("title"),
    create_attrs: MILESTONE_CREATE,
    update_attrs: MILESTONE_UPDATE,
    types: MILESTONE_TYPES,
    ..ResourceDef::new("ProjectMilestone", "/projects/{project_id}/milestones")
};

/// `/groups/{group_id}/milestones`
pub const GROUP_MILESTONE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    repr_attr: Some("title"),
    create_attrs: MILESTONE_CREATE,
    update_attrs: MILESTONE_UPDATE,
    types: MILESTONE_TYPES,
    ..ResourceDef::new("GroupMilestone", "/groups/{group_id}/milestones")
};

/// A milestone.
///
/// Only project milestones can be promoted; the server rejects
/// `promote` on a group milestone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Milestone(RestObject);

impl RestResource for Milestone {
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

impl Deref for Milestone {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Milestone {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Milestone {}
impl ObjectDeleteMixin for Milestone {}
impl RefreshMixin for Milestone {}
impl PromoteMixin for Milestone {}

/// Manages the milestones of a project or a group.
#[derive(Clone, Debug)]
pub struct MilestoneManager(RestManager);

impl MilestoneManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_MILESTONE).map(Self)
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_MILESTONE).map(Self)
    }
}

impl Manager for MilestoneManager {
    type Object = Milestone;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for MilestoneManager {}
impl ListMixin for MilestoneManager {}
impl CreateMixin for MilestoneManager {}
impl UpdateMixin for MilestoneManager {}
impl DeleteMixin for MilestoneManager {}
