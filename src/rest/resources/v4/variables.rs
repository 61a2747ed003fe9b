//! Project CI/CD variables.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::rest::{
    CreateMixin, DeleteMixin, GetMixin, ListMixin, Manager, ObjectDeleteMixin, ParentBinding,
    RequiredOptional, ResourceDef, ResourceError, RestManager, RestObject, RestResource,
    SaveMixin, SetMixin, UpdateMixin,
};

use super::Project;

/// `/projects/{project_id}/variables`
pub const PROJECT_VARIABLE: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("project_id", "id")],
    id_attr: Some("key"),
    create_attrs: RequiredOptional::new(
        &["key", "value"],
        &[
            "protected",
            "variable_type",
            "masked",
            "environment_scope",
            "raw",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &["key", "value"],
        &[
            "protected",
            "variable_type",
            "masked",
            "environment_scope",
            "raw",
        ],
    ),
    ..ResourceDef::new("ProjectVariable", "/projects/{project_id}/variables")
};

/// A variable, identified by its `key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectVariable(RestObject);

impl RestResource for ProjectVariable {
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

impl Deref for ProjectVariable {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProjectVariable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for ProjectVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for ProjectVariable {}
impl ObjectDeleteMixin for ProjectVariable {}

/// Manages `/projects/{project_id}/variables`.
#[derive(Clone, Debug)]
pub struct ProjectVariableManager(RestManager);

impl ProjectVariableManager {
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if the project has
    /// no `id`.
    pub fn for_project(project: &Project) -> Result<Self, ResourceError> {
        project.child_manager(&PROJECT_VARIABLE).map(Self)
    }
}

impl Manager for ProjectVariableManager {
    type Object = ProjectVariable;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for ProjectVariableManager {}
impl ListMixin for ProjectVariableManager {}
impl CreateMixin for ProjectVariableManager {}
impl UpdateMixin for ProjectVariableManager {}
impl DeleteMixin for ProjectVariableManager {}
impl SetMixin for ProjectVariableManager {}
