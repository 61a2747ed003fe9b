//! Object-level save, delete and refresh.

use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::mixins::send_update;
use crate::rest::object::RestResource;

/// Push local changes to the server.
#[allow(async_fn_in_trait)]
pub trait SaveMixin: RestResource {
    /// Sends the local changes, plus every attribute the update endpoint
    /// requires, and takes the server's answer as the new state.
    ///
    /// Does nothing when there are no local changes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if a required attribute is
    /// unknown, [`ResourceError::Update`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    /// The local changes are kept on error.
    async fn save(&mut self) -> Result<(), ResourceError> {
        let object = self.object();
        if !object.is_dirty() {
            return Ok(());
        }

        let mut data = Map::new();
        for attr in object.def().update_attrs.required {
            if let Some(value) = object.get(attr) {
                data.insert((*attr).to_string(), value.clone());
            }
        }
        data.extend(object.updated_attrs().clone());

        let attrs = send_update(object.manager(), &object.path(), Value::Object(data)).await?;
        self.object_mut().accept_server_state(attrs);
        Ok(())
    }
}

/// Delete this object.
#[allow(async_fn_in_trait)]
pub trait ObjectDeleteMixin: RestResource {
    /// Deletes the object's own path.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Delete`] if the request fails.
    async fn delete(&self) -> Result<(), ResourceError> {
        let object = self.object();

        object
            .manager()
            .send(
                Operation::Delete,
                HttpRequest::builder(HttpMethod::Delete, object.path()),
            )
            .await?;
        Ok(())
    }
}

/// Re-fetch this object.
#[allow(async_fn_in_trait)]
pub trait RefreshMixin: RestResource {
    /// Fetches the object's own path and takes the answer as the new state.
    ///
    /// Local changes are dropped. Lazy and list-created objects become fully
    /// populated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Get`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn refresh(&mut self) -> Result<(), ResourceError> {
        let object = self.object();
        let manager = object.manager();

        let response = manager
            .send(
                Operation::Get,
                HttpRequest::builder(HttpMethod::Get, object.path()),
            )
            .await?;
        let attrs = manager.expect_object(response.body)?;

        self.object_mut().accept_server_state(attrs);
        Ok(())
    }
}
