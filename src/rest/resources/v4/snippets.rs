//! Personal snippets.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::clients::Transport;
use crate::rest::{
    CreateMixin, DeleteMixin, GetMixin, ListMixin, ListParams, Manager, ObjectDeleteMixin,
    RefreshMixin, RequiredOptional, ResourceDef, ResourceError, ResourceResponse, RestManager,
    RestObject, RestResource, SaveMixin, UpdateMixin,
};

/// `/snippets`
pub const SNIPPET: ResourceDef = ResourceDef {
    repr_attr: Some("title"),
    create_attrs: RequiredOptional::new(&["title"], &["description", "visibility"])
        .with_exclusive(&["files", "file_name"]),
    update_attrs: RequiredOptional::new(
        &[],
        &["title", "files", "file_name", "content", "visibility", "description"],
    ),
    ..ResourceDef::new("Snippet", "/snippets")
};

/// A personal snippet.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snippet(RestObject);

impl RestResource for Snippet {
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

impl Deref for Snippet {
    type Target = RestObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Snippet {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SaveMixin for Snippet {}
impl ObjectDeleteMixin for Snippet {}
impl RefreshMixin for Snippet {}

/// Manages `/snippets`.
#[derive(Clone, Debug)]
pub struct SnippetManager(RestManager);

impl SnippetManager {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self(RestManager::top_level(transport, &SNIPPET))
    }

    /// Lists one page of public snippets (`/snippets/public`).
    ///
    /// # Errors
    ///
    /// See [`ListMixin::list`].
    pub async fn public(
        &self,
        params: ListParams,
    ) -> Result<ResourceResponse<Vec<Snippet>>, ResourceError> {
        self.list(params.path("/snippets/public")).await
    }
}

impl Manager for SnippetManager {
    type Object = Snippet;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for SnippetManager {}
impl ListMixin for SnippetManager {}
impl CreateMixin for SnippetManager {}
impl UpdateMixin for SnippetManager {}
impl DeleteMixin for SnippetManager {}
