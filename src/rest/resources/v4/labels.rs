//! Project and group labels.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin, ParentBinding,
    PromoteMixin, RequiredOptional, ResourceDef, ResourceError, RestManager, RestObject,
    RestResource, SaveMixin, SubscribableMixin, UpdateMixin,
};

use super::{Group, Project};

const LABEL_CREATE: RequiredOptional =
    RequiredOptional::new(&["name", "color"], &["description", "priority"]);
const LABEL_UPDATE: RequiredOptional =
    RequiredOptional::new(&["name"], &["new_name", "color", "description", "priority"]);

/// `/projects/{project_id}/labels`
pub const PROJECT_LABEL: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    id_attr: Some("name"),
    create_attrs: LABEL_CREATE,
    update_attrs: LABEL_UPDATE,
    ..ResourceDef::new("ProjectLabel", "/projects/{project_id}/labels")
};

/// `/groups/{group_id}/labels`
pub const GROUP_LABEL: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("group_id", "id")],
    id_attr: Some("name"),
    create_attrs: LABEL_CREATE,
    update_attrs: LABEL_UPDATE,
    ..ResourceDef::new("GroupLabel", "/groups/{group_id}/labels")
};

/// A label, identified by its `name`.
///
/// Rename a label by writing `new_name` and saving; `name` always
/// addresses the label on the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(RestObject);

impl RestResource for Label {
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

impl Deref for Label {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Label {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Label {}
impl ObjectDeleteMixin for Label {}
impl SubscribableMixin for Label {}
impl PromoteMixin for Label {}

/// Manages the labels of a project or a group.
#[derive(Clone, Debug)]
pub struct LabelManager(RestManager);

impl LabelManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_LABEL).map(Self)
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the group has no
    /// `id`.
    pub fn for_group(group: &Group) -> Result<Self, ResourceError> {
        group.child_manager(&GROUP_LABEL).map(Self)
    }
}

impl Manager for LabelManager {
    type Object = Label;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for LabelManager {}
impl ListMixin for LabelManager {}
impl CreateMixin for LabelManager {}
impl UpdateMixin for LabelManager {}
impl DeleteMixin for LabelManager {}
