//! Manager-level get, create, update, delete, set and head.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest};
use crate::rest::errors::{Operation, ResourceError};
use crate::rest::manager::Manager;
use crate::rest::mixins::{into_attrs, payload_request, send_update};
use crate::rest::object::{RestObject, RestResource};
use crate::rest::path::EncodedId;
use crate::rest::types::split_files;

/// Fetch one object by id.
#[allow(async_fn_in_trait)]
pub trait GetMixin: Manager {
    /// Fetches `{path}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Get`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn get(&self, id: impl Into<EncodedId>) -> Result<Self::Object, ResourceError> {
        let manager = self.rest_manager();
        let path = manager.item_path(&id.into());

        let response = manager
            .send(Operation::Get, HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        manager.wrap(response.body)
    }

    /// Returns an object holding only its id, without a request.
    ///
    /// Useful to reach sub-resources without fetching the parent.
    fn lazy(&self, id: impl Into<EncodedId>) -> Self::Object {
        Self::Object::from_object(RestObject::lazy(self.rest_manager(), &id.into()))
    }
}

/// Fetch a singleton resource.
#[allow(async_fn_in_trait)]
pub trait GetWithoutIdMixin: Manager {
    /// Fetches `{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Get`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn get(&self) -> Result<Self::Object, ResourceError> {
        let manager = self.rest_manager();

        let response = manager
            .send(
                Operation::Get,
                HttpRequest::builder(HttpMethod::Get, manager.path()),
            )
            .await?;
        manager.wrap(response.body)
    }
}

/// Create objects.
#[allow(async_fn_in_trait)]
pub trait CreateMixin: Manager {
    /// Creates an object in the collection.
    ///
    /// # Errors
    ///
    /// See [`create_at`](Self::create_at).
    async fn create(&self, data: Value) -> Result<Self::Object, ResourceError> {
        let path = self.rest_manager().path().to_string();
        self.create_at(&path, data).await
    }

    /// Creates an object by posting to `path`.
    ///
    /// Required and exclusive attributes are checked before any request.
    /// File attributes are sent as multipart parts.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for invalid data,
    /// [`ResourceError::Create`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn create_at(&self, path: &str, data: Value) -> Result<Self::Object, ResourceError> {
        let manager = self.rest_manager();
        let def = manager.def();

        let data = into_attrs(data)?;
        def.create_attrs.validate(&data, None)?;
        let (data, files) = split_files(data, def.types)?;

        let response = manager
            .send(
                Operation::Create,
                payload_request(HttpMethod::Post, path, data, files),
            )
            .await?;
        manager.wrap(response.body)
    }
}

/// Update objects.
///
/// Both methods return the server's mapping rather than an object; use
/// [`SaveMixin`](crate::rest::SaveMixin) to update an object in place.
#[allow(async_fn_in_trait)]
pub trait UpdateMixin: Manager {
    /// Updates `{path}/{id}`.
    ///
    /// The id attribute is not required in `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for invalid data,
    /// [`ResourceError::Update`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn update(
        &self,
        id: impl Into<EncodedId>,
        data: Value,
    ) -> Result<Map<String, Value>, ResourceError> {
        let manager = self.rest_manager();
        send_update(manager, &manager.item_path(&id.into()), data).await
    }

    /// Updates the collection path itself (singleton resources).
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    async fn update_without_id(&self, data: Value) -> Result<Map<String, Value>, ResourceError> {
        let manager = self.rest_manager();
        send_update(manager, manager.path(), data).await
    }
}

/// Delete objects.
#[allow(async_fn_in_trait)]
pub trait DeleteMixin: Manager {
    /// Deletes `{path}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Delete`] if the request fails.
    async fn delete(&self, id: impl Into<EncodedId>) -> Result<(), ResourceError> {
        let manager = self.rest_manager();
        let path = manager.item_path(&id.into());

        manager
            .send(
                Operation::Delete,
                HttpRequest::builder(HttpMethod::Delete, path),
            )
            .await?;
        Ok(())
    }

    /// Deletes the collection path itself (singleton resources).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Delete`] if the request fails.
    async fn delete_without_id(&self) -> Result<(), ResourceError> {
        let manager = self.rest_manager();

        manager
            .send(
                Operation::Delete,
                HttpRequest::builder(HttpMethod::Delete, manager.path()),
            )
            .await?;
        Ok(())
    }
}

/// Create or replace key/value resources.
#[allow(async_fn_in_trait)]
pub trait SetMixin: Manager {
    /// Method used by [`set`](Self::set).
    const SET_METHOD: HttpMethod = HttpMethod::Put;

    /// Sets `key` to `value`.
    ///
    /// # Errors
    ///
    /// See [`set_with`](Self::set_with).
    async fn set(
        &self,
        key: impl Into<EncodedId>,
        value: impl Into<Value>,
    ) -> Result<Self::Object, ResourceError> {
        self.set_with(key, value, Value::Null).await
    }

    /// Sets `key` to `value`, sending the attributes of `extra` alongside.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `extra` is not an object,
    /// [`ResourceError::Set`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    async fn set_with(
        &self,
        key: impl Into<EncodedId>,
        value: impl Into<Value>,
        extra: Value,
    ) -> Result<Self::Object, ResourceError> {
        let manager = self.rest_manager();
        let path = manager.item_path(&key.into());

        let mut data = Map::new();
        data.insert("value".to_string(), value.into());
        data.extend(into_attrs(extra)?);

        let response = manager
            .send(
                Operation::Set,
                HttpRequest::builder(Self::SET_METHOD, path)
                    .body(Value::Object(data))
                    .body_type(DataType::Json),
            )
            .await?;
        manager.wrap(response.body)
    }
}

/// Fetch response headers only.
#[allow(async_fn_in_trait)]
pub trait HeadMixin: Manager {
    /// Sends `HEAD {path}/{id}` and returns the lower-cased headers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Head`] if the request fails.
    async fn head(
        &self,
        id: impl Into<EncodedId>,
    ) -> Result<HashMap<String, Vec<String>>, ResourceError> {
        let manager = self.rest_manager();
        let path = manager.item_path(&id.into());

        let response = manager
            .send(Operation::Head, HttpRequest::builder(HttpMethod::Head, path))
            .await?;
        Ok(response.headers)
    }

    /// Sends `HEAD {path}` and returns the lower-cased headers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Head`] if the request fails.
    async fn head_without_id(&self) -> Result<HashMap<String, Vec<String>>, ResourceError> {
        let manager = self.rest_manager();

        let response = manager
            .send(
                Operation::Head,
                HttpRequest::builder(HttpMethod::Head, manager.path()),
            )
            .await?;
        Ok(response.headers)
    }
}
