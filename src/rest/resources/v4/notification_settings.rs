//! Notification settings: global, per project, per group.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{
    GetWithoutIdMixin, Manager, ParentBinding, RequiredOptional, ResourceDef, ResourceError,
    RestManager, RestObject, RestResource, SaveMixin, UpdateMixin,
};

use super::{Group, Project};

const NOTIFICATION_UPDATE: RequiredOptional = RequiredOptional::new(
    &[],
    &[
        "level",
        "notification_email",
        "new_note",
        "new_issue",
        "reopen_issue",
        "close_issue",
        "reassign_issue",
        "new_merge_request",
        "reopen_merge_request",
        "close_merge_request",
        "reassign_merge_request",
        "merge_merge_request",
    ],
);

/// `/notification_settings`
pub const NOTIFICATION_SETTINGS: ResourceDef = ResourceDef {
    id_attr: None,
    update_attrs: NOTIFICATION_UPDATE,
    ..ResourceDef::new("NotificationSettings", "/notification_settings")
};

/// `/projects/{project_id}/notification_settings`
pub const PROJECT_NOTIFICATION_SETTINGS: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    id_attr: None,
    update_attrs: NOTIFICATION_UPDATE,
    ..ResourceDef::new(
        "ProjectNotificationSettings",
        "/projects/{project_id}/notification_settings",
    )
};

/// `/groups/{group_id}/notification_settings`
pub const GROUP_NOTIFICATION_SETTINGS: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    id_attr: None,
    update_attrs: NOTIFICATION_UPDATE,
    ..ResourceDef::new(
        "GroupNotificationSettings",
        "/groups/{group_id}/notification_settings",
    )
};

/// Notification settings of the authenticated user. A singleton.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NotificationSettings(RestObject);

impl RestResource for NotificationSettings {
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

impl Deref for NotificationSettings {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for NotificationSettings {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for NotificationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for NotificationSettings {}

/// Fetches and updates notification settings.
#[derive(Clone, Debug)]
pub struct NotificationSettingsManager(RestManager);

impl NotificationSettingsManager {
    /// Global settings.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &NOTIFICATION_SETTINGS))
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project
            .child_manager(&PROJECT_NOTIFICATION_SETTINGS)
            .map(Self)
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_NOTIFICATION_SETTINGS).map(Self)
    }
}

impl Manager for NotificationSettingsManager {
    type Object = NotificationSettings;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetWithoutIdMixin for NotificationSettingsManager {}
impl UpdateMixin for NotificationSettingsManager {}
