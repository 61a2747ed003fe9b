//! Project merge requests.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin,
    ParentBinding, ParticipantsMixin, RefreshMixin, RequiredOptional, ResourceDef, ResourceError,
    RestManager, RestObject, RestResource, SaveMixin, SubscribableMixin, TimeTrackingMixin,
    TodoMixin, UpdateMixin,
};

use super::Project;

/// `/projects/{project_id}/merge_requests`
pub const PROJECT_MERGE_REQUEST: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    id_attr: Some("iid"),
    repr_attr: Some("title"),
    create_attrs: RequiredOptional::new(
        &["source_branch", "target_branch", "title"],
        &[
            "assignee_id",
            "assignee_ids",
            "reviewer_ids",
            "description",
            "target_project_id",
            "labels",
            "milestone_id",
            "remove_source_branch",
            "allow_collaboration",
            "squash",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &[],
        &[
            "target_branch",
            "assignee_id",
            "assignee_ids",
            "reviewer_ids",
            "title",
            "description",
            "state_event",
            "labels",
            "milestone_id",
            "remove_source_branch",
            "discussion_locked",
            "allow_maintainer_to_push",
            "squash",
        ],
    ),
    types: &[
        ("approver_ids", AttributeType::Array),
        ("approver_group_ids", AttributeType::Array),
        ("iids", AttributeType::Array),
        ("labels", AttributeType::CommaSeparatedList),
    ],
    ..ResourceDef::new("ProjectMergeRequest", "/projects/{project_id}/merge_requests")
};

/// A merge request, identified by its project-local `iid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectMergeRequest(RestObject);

impl RestResource for ProjectMergeRequest {
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

impl Deref for ProjectMergeRequest {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProjectMergeRequest {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for ProjectMergeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for ProjectMergeRequest {}
impl ObjectDeleteMixin for ProjectMergeRequest {}
impl RefreshMixin for ProjectMergeRequest {}
impl SubscribableMixin for ProjectMergeRequest {}
impl TodoMixin for ProjectMergeRequest {}
impl TimeTrackingMixin for ProjectMergeRequest {}
impl ParticipantsMixin for ProjectMergeRequest {}

/// Manages `/projects/{project_id}/merge_requests`.
#[derive(Clone, Debug)]
pub struct ProjectMergeRequestManager(RestManager);

impl ProjectMergeRequestManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_MERGE_REQUEST).map(Self)
    }
}

impl Manager for ProjectMergeRequestManager {
    type Object = ProjectMergeRequest;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for ProjectMergeRequestManager {}
impl ListMixin for ProjectMergeRequestManager {}
impl CreateMixin for ProjectMergeRequestManager {}
impl UpdateMixin for ProjectMergeRequestManager {}
impl DeleteMixin for ProjectMergeRequestManager {}
