//! Feature flags of the instance (admin only).

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::clients::{HttpMethod, Transport};
use crate::rest::{
    DeleteMixin, ListMixin, Manager, ObjectDeleteMixin, ResourceDef, RestManager, RestObject,
    RestResource, SetMixin,
};

/// `/features`
pub const FEATURE: ResourceDef = ResourceDef {
    id_attr: Some("name"),
    ..ResourceDef::new("Feature", "/features")
};

/// A feature flag, identified by its `name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Feature(RestObject);

impl RestResource for Feature {
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

impl Deref for Feature {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ObjectDeleteMixin for Feature {}

/// Manages `/features`.
///
/// ```rust,no_run
/// # async fn run(features: gitlab_api::rest::resources::FeatureManager)
/// #     -> Result<(), gitlab_api::rest::ResourceError> {
/// use gitlab_api::rest::SetMixin;
/// use serde_json::json;
///
/// features
///     .set_with("new_navigation", true, json!({"user": "alice"}))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FeatureManager(RestManager);

impl FeatureManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &FEATURE))
    }
}

impl Manager for FeatureManager {
    type Object = Feature;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl ListMixin for FeatureManager {}
impl DeleteMixin for FeatureManager {}

impl SetMixin for FeatureManager {
    const SET_METHOD: HttpMethod = HttpMethod::Post;
}
