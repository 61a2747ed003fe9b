//! Single-request actions on a sub-path of an object or manager.

use serde_json::{json, Map, Value};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::manager::Manager;
use crate::rest::mixins::object_action;
use crate::rest::object::RestResource;

/// Access level granted by [`AccessRequestApproveMixin::approve`].
pub const DEVELOPER_ACCESS: u32 = 30;

fn expect_object<T: RestResource>(
    resource: &T,
    body: Value,
) -> Result<Map<String, Value>, ResourceError> {
    resource.object().manager().expect_object(body)
}

/// Subscribe to notifications.
#[allow(async_fn_in_trait)]
pub trait SubscribableMixin: RestResource {
    /// Subscribes the current user and updates the object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails (GitLab
    /// answers 304 when already subscribed).
    async fn subscribe(&mut self) -> Result<(), ResourceError> {
        let body = object_action(self.object(), "subscribe", HttpMethod::Post, None).await?;
        let attrs = expect_object(&*self, body)?;
        self.object_mut().accept_server_state(attrs);
        Ok(())
    }

    /// Unsubscribes the current user and updates the object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn unsubscribe(&mut self) -> Result<(), ResourceError> {
        let body = object_action(self.object(), "unsubscribe", HttpMethod::Post, None).await?;
        let attrs = expect_object(&*self, body)?;
        self.object_mut().accept_server_state(attrs);
        Ok(())
    }
}

/// Add the object to the current user's todo list.
#[allow(async_fn_in_trait)]
pub trait TodoMixin: RestResource {
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn todo(&self) -> Result<(), ResourceError> {
        object_action(self.object(), "todo", HttpMethod::Post, None).await?;
        Ok(())
    }
}

/// Time tracking on issues and merge requests.
///
/// Durations use GitLab's human format, e.g. `"3h30m"`.
#[allow(async_fn_in_trait)]
pub trait TimeTrackingMixin: RestResource {
    /// Returns the time statistics.
    ///
    /// Uses the `time_stats` attribute when the object already carries it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn time_stats(&self) -> Result<Value, ResourceError> {
        if let Some(stats) = self.object().get("time_stats") {
            return Ok(stats.clone());
        }
        object_action(self.object(), "time_stats", HttpMethod::Get, None).await
    }

    /// Sets the time estimate.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn time_estimate(&self, duration: &str) -> Result<Value, ResourceError> {
        let body = json!({ "duration": duration });
        object_action(self.object(), "time_estimate", HttpMethod::Post, Some(body)).await
    }

    /// Resets the time estimate.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn reset_time_estimate(&self) -> Result<Value, ResourceError> {
        object_action(self.object(), "reset_time_estimate", HttpMethod::Post, None).await
    }

    /// Adds spent time.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn add_spent_time(&self, duration: &str) -> Result<Value, ResourceError> {
        let body = json!({ "duration": duration });
        object_action(self.object(), "add_spent_time", HttpMethod::Post, Some(body)).await
    }

    /// Resets the spent time.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn reset_spent_time(&self) -> Result<Value, ResourceError> {
        object_action(self.object(), "reset_spent_time", HttpMethod::Post, None).await
    }
}

/// List the users taking part in an issue or merge request.
#[allow(async_fn_in_trait)]
pub trait ParticipantsMixin: RestResource {
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an array.
    async fn participants(&self) -> Result<Vec<Value>, ResourceError> {
        match object_action(self.object(), "participants", HttpMethod::Get, None).await? {
            Value::Array(users) => Ok(users),
            _ => Err(ResourceError::MalformedResponse {
                resource: self.object().def().name,
                expected: "a JSON array",
            }),
        }
    }
}

/// Approve a pending access request.
#[allow(async_fn_in_trait)]
pub trait AccessRequestApproveMixin: RestResource {
    /// Approves with [`DEVELOPER_ACCESS`].
    ///
    /// # Errors
    ///
    /// See [`approve_as`](Self::approve_as).
    async fn approve(&mut self) -> Result<(), ResourceError> {
        self.approve_as(DEVELOPER_ACCESS).await
    }

    /// Approves with the given access level and updates the object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn approve_as(&mut self, access_level: u32) -> Result<(), ResourceError> {
        let body = json!({ "access_level": access_level });
        let body = object_action(self.object(), "approve", HttpMethod::Put, Some(body)).await?;
        let attrs = expect_object(&*self, body)?;
        self.object_mut().accept_server_state(attrs);
        Ok(())
    }
}

/// Promote a project-level object to its group.
#[allow(async_fn_in_trait)]
pub trait PromoteMixin: RestResource {
    /// Promotes the object and updates it from the answer.
    ///
    /// Uses the resource's update method.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails.
    async fn promote(&mut self) -> Result<(), ResourceError> {
        let method = self.object().def().update_method.http_method();
        let body = object_action(self.object(), "promote", method, None).await?;
        let attrs = expect_object(&*self, body)?;
        self.object_mut().accept_server_state(attrs);
        Ok(())
    }
}

/// Preview badge URLs with placeholders filled in.
#[allow(async_fn_in_trait)]
pub trait BadgeRenderMixin: Manager {
    /// Renders `link_url` and `image_url` as the server would.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Action`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn render(
        &self,
        link_url: &str,
        image_url: &str,
    ) -> Result<Map<String, Value>, ResourceError> {
        let manager = self.rest_manager();
        let request = HttpRequest::builder(HttpMethod::Get, format!("{}/render", manager.path()))
            .query_param("link_url", link_url)
            .query_param("image_url", image_url);

        let response = manager.send(Operation::Action("render"), request).await?;
        manager.expect_object(response.body)
    }
}
