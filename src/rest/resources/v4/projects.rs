//! Projects.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, HeadMixin, ListMixin, Manager,
    ObjectDeleteMixin, RefreshMixin, RequiredOptional, ResourceDef, ResourceError, RestManager,
    RestObject, RestResource, SaveMixin, UpdateMixin,
};

use super::{
    AccessRequestManager, BadgeManager, LabelManager, MilestoneManager,
    NotificationSettingsManager, ProjectIssueManager, ProjectMergeRequestManager,
    ProjectVariableManager,
};

/// `/projects`
pub const PROJECT: ResourceDef = ResourceDef {
    repr_attr: Some("path_with_namespace"),
    create_attrs: RequiredOptional::new(
        &[],
        &[
            "name",
            "path",
            "namespace_id",
            "default_branch",
            "description",
            "visibility",
            "issues_enabled",
            "merge_requests_enabled",
            "wiki_enabled",
            "initialize_with_readme",
            "topics",
            "avatar",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &[],
        &[
            "name",
            "path",
            "default_branch",
            "description",
            "visibility",
            "issues_enabled",
            "merge_requests_enabled",
            "wiki_enabled",
            "archived",
            "topics",
            "avatar",
        ],
    ),
    types: &[
        ("avatar", AttributeType::Image),
        ("topic", AttributeType::CommaSeparatedList),
        ("topics", AttributeType::Array),
    ],
    ..ResourceDef::new("Project", "/projects")
};

/// A project.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Project(RestObject);

impl Project {
    /// Issues of this project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn issues(&self) -> Result<ProjectIssueManager, ResourceError> {
        ProjectIssueManager::for_project(self)
    }

    /// Merge requests of this project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn merge_requests(&self) -> Result<ProjectMergeRequestManager, ResourceError> {
        ProjectMergeRequestManager::for_project(self)
    }

    /// CI/CD variables of this project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn variables(&self) -> Result<ProjectVariableManager, ResourceError> {
        ProjectVariableManager::for_project(self)
    }

    /// Pending access requests.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn access_requests(&self) -> Result<AccessRequestManager, ResourceError> {
        AccessRequestManager::for_project(self)
    }

    /// Badges.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn badges(&self) -> Result<BadgeManager, ResourceError> {
        BadgeManager::for_project(self)
    }

    /// Milestones.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn milestones(&self) -> Result<MilestoneManager, ResourceError> {
        MilestoneManager::for_project(self)
    }

    /// Labels.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn labels(&self) -> Result<LabelManager, ResourceError> {
        LabelManager::for_project(self)
    }

    /// Notification settings of the current user for this project.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn notification_settings(&self) -> Result<NotificationSettingsManager, ResourceError> {
        NotificationSettingsManager::for_project(self)
    }
}

impl RestResource for Project {
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

impl Deref for Project {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Project {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Project {}
impl ObjectDeleteMixin for Project {}
impl RefreshMixin for Project {}

/// Manages `/projects`.
#[derive(Clone, Debug)]
pub struct ProjectManager(RestManager);

impl ProjectManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &PROJECT))
    }
}

impl Manager for ProjectManager {
    type Object = Project;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for ProjectManager {}
impl ListMixin for ProjectManager {}
impl CreateMixin for ProjectManager {}
impl UpdateMixin for ProjectManager {}
impl DeleteMixin for ProjectManager {}
impl HeadMixin for ProjectManager {}
