//! Issue notes (comments).

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin, ParentBinding,
    RequiredOptional, ResourceDef, ResourceError, RestManager, RestObject, RestResource,
    SaveMixin, UpdateMixin,
};

use super::ProjectIssue;

/// `/projects/{project_id}/issues/{issue_iid}/notes`
pub const PROJECT_ISSUE_NOTE: ResourceDef = ResourceDef {
    from_parent_attrs: &[
        ParentBinding::new("project_id", "project_id"),
        ParentBinding::new("issue_iid", "iid"),
    ],
    create_attrs: RequiredOptional::new(&["body"], &["created_at", "internal"]),
    update_attrs: RequiredOptional::new(&["body"], &[]),
    ..ResourceDef::new(
        "ProjectIssueNote",
        "/projects/{project_id}/issues/{issue_iid}/notes",
    )
};

/// A comment on an issue.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectIssueNote(RestObject);

impl RestResource for ProjectIssueNote {
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

impl Deref for ProjectIssueNote {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProjectIssueNote {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for ProjectIssueNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for ProjectIssueNote {}
impl ObjectDeleteMixin for ProjectIssueNote {}

/// Manages `/projects/{project_id}/issues/{issue_iid}/notes`.
#[derive(Clone, Debug)]
pub struct ProjectIssueNoteManager(RestManager);

impl ProjectIssueNoteManager {
    /// The issue's `project_id` attribute and `iid` fill the path.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if either is
    /// missing.
    pub fn for_issue(issue: &ProjectIssue) -> Result<Self, ResourceError> {
        issue.child_manager(&PROJECT_ISSUE_NOTE).map(Self)
    }
}

impl Manager for ProjectIssueNoteManager {
    type Object = ProjectIssueNote;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for ProjectIssueNoteManager {}
impl ListMixin for ProjectIssueNoteManager {}
impl CreateMixin for ProjectIssueNoteManager {}
impl UpdateMixin for ProjectIssueNoteManager {}
impl DeleteMixin for ProjectIssueNoteManager {}
