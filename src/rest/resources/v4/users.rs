//! Users and the authenticated user.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{
    AttributeType, CreateMixin, DeleteMixin, GetMixin, GetWithoutIdMixin, ListMixin, Manager,
    ObjectDeleteMixin, RefreshMixin, RequiredOptional, ResourceDef, RestManager, RestObject,
    RestResource, SaveMixin, UpdateMixin,
};

/// `/users`
pub const USER: ResourceDef = ResourceDef {
    repr_attr: Some("username"),
    create_attrs: RequiredOptional::new(
        &[],
        &[
            "email",
            "username",
            "name",
            "password",
            "reset_password",
            "skype",
            "linkedin",
            "twitter",
            "projects_limit",
            "extern_uid",
            "provider",
            "bio",
            "admin",
            "can_create_group",
            "website_url",
            "skip_confirmation",
            "external",
            "organization",
            "location",
            "avatar",
            "public_email",
            "private_profile",
        ],
    ),
    update_attrs: RequiredOptional::new(
        &["email", "username", "name"],
        &[
            "password",
            "skype",
            "linkedin",
            "twitter",
            "projects_limit",
            "extern_uid",
            "provider",
            "bio",
            "admin",
            "can_create_group",
            "website_url",
            "skip_reconfirmation",
            "external",
            "organization",
            "location",
            "avatar",
            "public_email",
            "private_profile",
        ],
    ),
    types: &[("avatar", AttributeType::Image)],
    ..ResourceDef::new("User", "/users")
};

/// `/user`
pub const CURRENT_USER: ResourceDef = ResourceDef {
    id_attr: None,
    repr_attr: Some("username"),
    ..ResourceDef::new("CurrentUser", "/user")
};

/// A user account.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct User(RestObject);

impl RestResource for User {
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

impl Deref for User {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for User {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for User {}
impl ObjectDeleteMixin for User {}
impl RefreshMixin for User {}

/// Manages `/users`.
#[derive(Clone, Debug)]
pub struct UserManager(RestManager);

impl UserManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &USER))
    }
}

impl Manager for UserManager {
    type Object = User;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for UserManager {}
impl ListMixin for UserManager {}
impl CreateMixin for UserManager {}
impl UpdateMixin for UserManager {}
impl DeleteMixin for UserManager {}

/// The user the token belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrentUser(RestObject);

impl RestResource for CurrentUser {
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

impl Deref for CurrentUser {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CurrentUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl RefreshMixin for CurrentUser {}

/// Fetches `/user`.
#[derive(Clone, Debug)]
pub struct CurrentUserManager(RestManager);

impl CurrentUserManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &CURRENT_USER))
    }
}

impl Manager for CurrentUserManager {
    type Object = CurrentUser;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetWithoutIdMixin for CurrentUserManager {}
