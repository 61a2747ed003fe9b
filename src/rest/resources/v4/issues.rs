//! Project and group issues.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin,
    ParentBinding, ParticipantsMixin, RefreshMixin, RequiredOptional, ResourceDef, ResourceError,
    RestManager, RestObject, RestResource, SaveMixin, SubscribableMixin, TimeTrackingMixin,
    TodoMixin, UpdateMixin,
};

use super::{Group, Project, ProjectIssueNoteManager};

const ISSUE_TYPES: &[(&str, AttributeType)] = &[
    ("iids", AttributeType::Array),
    ("labels", AttributeType::CommaSeparatedList),
];

/// `/projects/{project_id}/issues`
pub const PROJECT_ISSUE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    id_attr: Some("iid"),
    repr_attr: Some("title"),
    create_attrs: RequiredOptional::new(
        &["title"],
        &[
            "description",
            "confidential",
            "assignee_ids",
            "milestone_id",
            "labels",
            "created_at",
            "due_date",
            "merge_request_to_resolve_discussions_of",
            "discussion_to_resolve",
            "weight",
            "issue_type",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &[],
        &[
            "title",
            "description",
            "confidential",
            "assignee_ids",
            "milestone_id",
            "labels",
            "state_event",
            "updated_at",
            "due_date",
            "discussion_locked",
            "weight",
            "issue_type",
        ],
    ),
    types: ISSUE_TYPES,
    ..ResourceDef::new("ProjectIssue", "/projects/{project_id}/issues")
};

/// `/groups/{group_id}/issues`
pub const GROUP_ISSUE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    repr_attr: Some("title"),
    types: ISSUE_TYPES,
    ..ResourceDef::new("GroupIssue", "/groups/{group_id}/issues")
};

/// An issue of a project, identified by its project-local `iid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectIssue(RestObject);

impl ProjectIssue {
    /// Comments on this issue.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the issue has no
    /// `project_id` or `iid`.
    pub fn notes(&self) -> Result<ProjectIssueNoteManager, ResourceError> {
        ProjectIssueNoteManager::for_issue(self)
    }
}

impl RestResource for ProjectIssue {
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

impl Deref for ProjectIssue {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProjectIssue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for ProjectIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for ProjectIssue {}
impl ObjectDeleteMixin for ProjectIssue {}
impl RefreshMixin for ProjectIssue {}
impl SubscribableMixin for ProjectIssue {}
impl TodoMixin for ProjectIssue {}
impl TimeTrackingMixin for ProjectIssue {}
impl ParticipantsMixin for ProjectIssue {}

/// Manages `/projects/{project_id}/issues`.
#[derive(Clone, Debug)]
pub struct ProjectIssueManager(RestManager);

impl ProjectIssueManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_ISSUE).map(Self)
    }
}

impl Manager for ProjectIssueManager {
    type Object = ProjectIssue;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for ProjectIssueManager {}
impl ListMixin for ProjectIssueManager {}
impl CreateMixin for ProjectIssueManager {}
impl UpdateMixin for ProjectIssueManager {}
impl DeleteMixin for ProjectIssueManager {}

/// Lists `/groups/{group_id}/issues`.
///
/// Group issues are read-only; fetch an issue through its project to
/// modify it.
#[derive(Clone, Debug)]
pub struct GroupIssueManager(RestManager);

impl GroupIssueManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_ISSUE).map(Self)
    }
}

impl Manager for GroupIssueManager {
    type Object = RestObject;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl ListMixin for GroupIssueManager {}
