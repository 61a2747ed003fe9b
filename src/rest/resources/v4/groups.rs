//! Groups.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin,
    RefreshMixin, RequiredOptional, ResourceDef, ResourceError, RestManager, RestObject,
    RestResource, SaveMixin, UpdateMixin,
};

use super::{
    AccessRequestManager, BadgeManager, GroupIssueManager, LabelManager, MilestoneManager,
    NotificationSettingsManager,
};

/// `/groups`
pub const GROUP: ResourceDef = ResourceDef {
    repr_attr: Some("name"),
    create_attrs: RequiredOptional::new(
        &["name", "path"],
        &[
            "description",
            "visibility",
            "parent_id",
            "lfs_enabled",
            "request_access_enabled",
            "avatar",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &[],
        &[
            "name",
            "path",
            "description",
            "visibility",
            "lfs_enabled",
            "request_access_enabled",
            "avatar",
        ],
    ),
    types: &[
        ("avatar", AttributeType::Image),
        ("skip_groups", AttributeType::Array),
    ],
    ..ResourceDef::new("Group", "/groups")
};

/// A group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group(RestObject);

impl Group {
    /// Issues of every project in the group (read-only).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn issues(&self) -> Result<GroupIssueManager, ResourceError> {
        GroupIssueManager::for_group(self)
    }

    /// Pending access requests.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn access_requests(&self) -> Result<AccessRequestManager, ResourceError> {
        AccessRequestManager::for_group(self)
    }

    /// Badges.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn badges(&self) -> Result<BadgeManager, ResourceError> {
        BadgeManager::for_group(self)
    }

    /// Milestones.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn milestones(&self) -> Result<MilestoneManager, ResourceError> {
        MilestoneManager::for_group(self)
    }

    /// Labels.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn labels(&self) -> Result<LabelManager, ResourceError> {
        LabelManager::for_group(self)
    }

    /// Notification settings of the current user for this group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn notification_settings(&self) -> Result<NotificationSettingsManager, ResourceError> {
        NotificationSettingsManager::for_group(self)
    }
}

impl RestResource for Group {
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

impl Deref for Group {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Group {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Group {}
impl ObjectDeleteMixin for Group {}
impl RefreshMixin for Group {}

/// Manages `/groups`.
#[derive(Clone, Debug)]
pub struct GroupManager(RestManager);

impl GroupManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &GROUP))
    }
}

impl Manager for GroupManager {
    type Object = Group;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for GroupManager {}
impl ListMixin for GroupManager {}
impl CreateMixin for GroupManager {}
impl UpdateMixin for GroupManager {}
impl DeleteMixin for GroupManager {}
