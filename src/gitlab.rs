//! The entry point: a transport plus accessors for the top-level managers.

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::GitlabConfig;
use crate::rest::resources::{
    CurrentUserManager, FeatureManager, GroupManager, NotificationSettingsManager,
    ProjectManager, SnippetManager, UserManager,
};

/// A connection to one GitLab server.
///
/// Cloning is cheap; clones share the transport.
///
/// # Example
///
/// ```rust
/// use gitlab_api::rest::GetMixin;
/// use gitlab_api::testing::RecordingTransport;
/// use gitlab_api::{Gitlab, HttpMethod};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let transport = Arc::new(RecordingTransport::new());
/// transport.respond(HttpMethod::Get, "/projects/1", 200, json!({"id": 1, "path_with_namespace": "a/b"}));
///
/// let gitlab = Gitlab::from_transport(transport);
/// let project = gitlab.projects().get(1).await.unwrap();
/// assert_eq!(project.to_string(), "<Project id:1 path_with_namespace:a/b>");
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Gitlab {
    transport: Arc<dyn Transport>,
}

// Verify Gitlab is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Gitlab>();
};

impl Gitlab {
    /// Connects with an [`HttpClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &GitlabConfig) -> Result<Self, HttpError> {
        Ok(Self::from_transport(Arc::new(HttpClient::new(config)?)))
    }

    /// Connects with the configuration read from the environment.
    ///
    /// See [`GitlabConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] wrapped in a boxed error if the
    /// environment is incomplete, or the client cannot be created.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = GitlabConfig::from_env()?;
        Ok(Self::new(&config)?)
    }

    /// Uses an existing transport.
    #[must_use]
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[must_use]
    pub fn projects(&self) -> ProjectManager {
        ProjectManager::new(self.transport.clone())
    }

    #[must_use]
    pub fn groups(&self) -> GroupManager {
        GroupManager::new(self.transport.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.transport.clone())
    }

    /// The authenticated user (`/user`).
    #[must_use]
    pub fn user(&self) -> CurrentUserManager {
        CurrentUserManager::new(self.transport.clone())
    }

    #[must_use]
    pub fn features(&self) -> FeatureManager {
        FeatureManager::new(self.transport.clone())
    }

    #[must_use]
    pub fn snippets(&self) -> SnippetManager {
        SnippetManager::new(self.transport.clone())
    }

    /// Global notification settings.
    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettingsManager {
        NotificationSettingsManager::new(self.transport.clone())
    }
}
