//! Resource objects.
//!
//! A [`RestObject`] is one resource instance: its [`AttributeStore`] plus the
//! manager it belongs to. Typed resources wrap a `RestObject` and implement
//! [`RestResource`]; the object-level mixins (`SaveMixin`, `RefreshMixin`,
//! ...) work on any `RestResource`.
//!
//! # Freshness
//!
//! | State | Meaning |
//! |-------|---------|
//! | [`ObjectState::Lazy`] | Built from an id only, never fetched |
//! | [`ObjectState::Populated`] | Holds server data and no local changes |
//! | [`ObjectState::Dirty`] | Holds local changes not yet saved |
//!
//! A fetch moves a lazy object to `Populated`, a write moves any object to
//! `Dirty`, and a successful save or refresh moves it back to `Populated`.
//! There is no way back to `Lazy`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::rest::attributes::AttributeStore;
use crate::rest::errors::{AttributeHint, ResourceError};
use crate::rest::manager::RestManager;
use crate::rest::path::{EncodedId, ResourceDef};

/// Freshness of an object's attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectState {
    /// Created from an id without fetching.
    Lazy,
    /// In sync with the last server response.
    Populated,
    /// Carries local changes.
    Dirty,
}

/// One resource instance.
///
/// Equality and hashing use the resource type and the id attribute's value.
/// Objects without an id value are only equal to themselves.
#[derive(Clone, Debug)]
pub struct RestObject {
    manager: RestManager,
    attrs: AttributeStore,
    created_from_list: bool,
    lazy: bool,
}

impl RestObject {
    /// Creates a populated object owned by `manager`.
    ///
    /// The manager's parent-bound values are readable on the object.
    #[must_use]
    pub fn new(manager: &RestManager, attrs: Map<String, Value>) -> Self {
        Self {
            manager: manager.clone(),
            attrs: AttributeStore::new(attrs, manager.parent_attrs().clone()),
            created_from_list: false,
            lazy: false,
        }
    }

    pub(crate) fn from_list(manager: &RestManager, attrs: Map<String, Value>) -> Self {
        Self {
            created_from_list: true,
            ..Self::new(manager, attrs)
        }
    }

    /// Creates an object holding only its id, without any request.
    ///
    /// Resources without an id attribute store the value under `id`.
    pub(crate) fn lazy(manager: &RestManager, id: &EncodedId) -> Self {
        let id_attr = manager.def().id_attr.unwrap_or("id");
        let mut attrs = Map::new();
        attrs.insert(id_attr.to_string(), id.to_value());
        Self {
            lazy: true,
            ..Self::new(manager, attrs)
        }
    }

    /// Reads an attribute: local changes, then server data, then values
    /// bound from the parent.
    ///
    /// Arrays from the server are copied into the local changes on first
    /// read so in-place edits are saved.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AttributeNotFound`], noting whether the
    /// object is lazy or came from a list call.
    pub fn read(&mut self, name: &str) -> Result<&Value, ResourceError> {
        let (resource, hint) = (self.def().name, self.hint());
        self.attrs
            .read(name)
            .ok_or_else(|| not_found(resource, name, hint))
    }

    /// Returns a mutable handle to an attribute, tracked as a local change.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AttributeNotFound`] if the attribute is
    /// absent or only bound from the parent.
    pub fn read_mut(&mut self, name: &str) -> Result<&mut Value, ResourceError> {
        let (resource, hint) = (self.def().name, self.hint());
        self.attrs
            .read_mut(name)
            .ok_or_else(|| not_found(resource, name, hint))
    }

    /// Looks an attribute up without side effects.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Sets an attribute locally.
    pub fn write(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attrs.write(name, value.into());
    }

    /// Returns a merged copy of the attributes.
    #[must_use]
    pub fn snapshot(&self, include_parent_attrs: bool) -> Map<String, Value> {
        self.attrs.snapshot(include_parent_attrs)
    }

    /// Deserializes the current attributes, parent attributes included.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the attributes do not fit `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.snapshot(true)))
    }

    /// Serializes the current attributes as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.snapshot(false)).to_string()
    }

    /// Replaces the server data and drops local changes.
    ///
    /// The object counts as fully fetched afterwards.
    pub fn accept_server_state(&mut self, attrs: Map<String, Value>) {
        self.attrs.accept_server_state(attrs);
        self.lazy = false;
        self.created_from_list = false;
    }

    /// Returns local changes since the last sync.
    #[must_use]
    pub const fn updated_attrs(&self) -> &Map<String, Value> {
        self.attrs.updated_attrs()
    }

    /// Returns the attributes last received from the server.
    #[must_use]
    pub const fn server_attrs(&self) -> &Map<String, Value> {
        self.attrs.server_attrs()
    }

    /// Returns the values bound from the parent.
    #[must_use]
    pub const fn parent_attrs(&self) -> &Map<String, Value> {
        self.attrs.parent_attrs()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.attrs.is_dirty()
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        self.lazy
    }

    #[must_use]
    pub const fn created_from_list(&self) -> bool {
        self.created_from_list
    }

    /// Returns the freshness state.
    #[must_use]
    pub fn state(&self) -> ObjectState {
        if self.is_dirty() {
            ObjectState::Dirty
        } else if self.lazy {
            ObjectState::Lazy
        } else {
            ObjectState::Populated
        }
    }

    /// Returns the id attribute's value, if the resource has one and it is set.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.def()
            .id_attr
            .and_then(|attr| self.get(attr))
            .filter(|value| !value.is_null())
    }

    /// Returns the id ready for use in a path.
    #[must_use]
    pub fn encoded_id(&self) -> Option<EncodedId> {
        self.id().and_then(EncodedId::from_value)
    }

    /// Returns the object's own path: the collection path plus the id, or
    /// the collection path alone for resources without an id.
    #[must_use]
    pub fn path(&self) -> String {
        match self.encoded_id() {
            Some(id) => self.manager.item_path(&id),
            None => self.manager.path().to_string(),
        }
    }

    /// Returns the manager this object belongs to.
    #[must_use]
    pub const fn manager(&self) -> &RestManager {
        &self.manager
    }

    /// Returns the resource definition.
    #[must_use]
    pub const fn def(&self) -> &'static ResourceDef {
        self.manager.def()
    }

    /// Creates a manager for a sub-resource scoped under this object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingParentAttribute`] if this object
    /// lacks an attribute the child path needs.
    pub fn child_manager(&self, def: &'static ResourceDef) -> Result<RestManager, ResourceError> {
        RestManager::new(Arc::clone(self.manager.transport()), def, Some(self))
    }

    const fn hint(&self) -> AttributeHint {
        if self.lazy {
            AttributeHint::Lazy
        } else if self.created_from_list {
            AttributeHint::CreatedFromList
        } else {
            AttributeHint::None
        }
    }
}

fn not_found(resource: &'static str, name: &str, hint: AttributeHint) -> ResourceError {
    ResourceError::AttributeNotFound {
        resource,
        name: name.to_string(),
        hint,
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl fmt::Display for RestObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let def = self.def();
        let repr = def
            .repr_attr
            .filter(|attr| Some(*attr) != def.id_attr)
            .and_then(|attr| self.get(attr).map(|value| (attr, value)));

        write!(f, "<{}", def.name)?;
        if let Some(id_attr) = def.id_attr {
            write!(f, " {id_attr}:{}", display_value(self.get(id_attr)))?;
        }
        if let Some((attr, value)) = repr {
            write!(f, " {attr}:{}", display_value(Some(value)))?;
        }
        f.write_str(">")
    }
}

impl PartialEq for RestObject {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => self.def().name == other.def().name && a == b,
            _ => std::ptr::eq(self, other),
        }
    }
}

impl Eq for RestObject {}

impl Hash for RestObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(id) = self.id() {
            self.def().name.hash(state);
            id.to_string().hash(state);
        }
    }
}

/// A typed view of a [`RestObject`].
///
/// Object-level mixins are implemented for any `RestResource`.
pub trait RestResource: Sized {
    /// Wraps an untyped object.
    fn from_object(object: RestObject) -> Self;

    /// Returns the untyped object.
    fn object(&self) -> &RestObject;

    /// Returns the untyped object mutably.
    fn object_mut(&mut self) -> &mut RestObject;
}

impl RestResource for RestObject {
    fn from_object(object: RestObject) -> Self {
        object
    }

    fn object(&self) -> &RestObject {
        self
    }

    fn object_mut(&mut self) -> &mut RestObject {
        self
    }
}

// Verify RestObject is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestObject>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::path::ParentBinding;
    use crate::testing::RecordingTransport;
    use serde_json::json;
    use std::collections::HashSet;

    const FAKE: ResourceDef = ResourceDef {
        repr_attr: Some("name"),
        ..ResourceDef::new("FakeObject", "/tests")
    };
    const SINGLETON: ResourceDef = ResourceDef {
        id_attr: None,
        ..ResourceDef::new("NotificationSettings", "/notification_settings")
    };
    const CHILD: ResourceDef = ResourceDef {
        from_parent_attrs: &[ParentBinding::new("test_id", "id")],
        ..ResourceDef::new("FakeChild", "/tests/{test_id}/children")
    };

    fn manager(def: &'static ResourceDef) -> RestManager {
        RestManager::new(Arc::new(RecordingTransport::new()), def, None).unwrap()
    }

    fn object(def: &'static ResourceDef, attrs: Value) -> RestObject {
        RestObject::new(&manager(def), attrs.as_object().cloned().unwrap())
    }

    #[test]
    fn test_display() {
        assert_eq!(
            object(&FAKE, json!({"id": 1, "name": "fake"})).to_string(),
            "<FakeObject id:1 name:fake>"
        );
        assert_eq!(object(&FAKE, json!({"id": 1})).to_string(), "<FakeObject id:1>");
        assert_eq!(object(&FAKE, json!({})).to_string(), "<FakeObject id:None>");
        assert_eq!(object(&SINGLETON, json!({"level": "watch"})).to_string(), "<NotificationSettings>");
    }

    #[test]
    fn test_equality_by_id() {
        let a = object(&FAKE, json!({"id": 1, "name": "a"}));
        let b = object(&FAKE, json!({"id": 1, "name": "b"}));
        let c = object(&FAKE, json!({"id": 2, "name": "a"}));

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<RestObject> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_objects_without_id_compare_by_identity() {
        let a = object(&SINGLETON, json!({"level": "watch"}));
        let b = object(&SINGLETON, json!({"level": "watch"}));

        assert_eq!(a, a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_attribute_not_found_hints() {
        let mut listed = RestObject::from_list(&manager(&FAKE), Map::new());
        let err = listed.read("missing").unwrap_err();
        assert!(err.to_string().contains("was created via a list() call"));

        let mut lazy = RestObject::lazy(&manager(&FAKE), &EncodedId::from(1));
        let err = lazy.read("name").unwrap_err();
        assert!(err.to_string().contains("lazy object"));

        let mut full = object(&FAKE, json!({"id": 1}));
        let err = full.read("name").unwrap_err();
        assert_eq!(err.to_string(), "'FakeObject' object has no attribute 'name'");
    }

    #[test]
    fn test_lazy_object_stores_decoded_id() {
        let lazy = RestObject::lazy(&manager(&FAKE), &EncodedId::from("group/app"));

        assert_eq!(lazy.id(), Some(&json!("group/app")));
        assert_eq!(lazy.path(), "/tests/group%2Fapp");
        assert_eq!(lazy.state(), ObjectState::Lazy);
    }

    #[test]
    fn test_state_transitions() {
        let mut lazy = RestObject::lazy(&manager(&FAKE), &EncodedId::from(1));
        assert_eq!(lazy.state(), ObjectState::Lazy);

        lazy.write("name", "x");
        assert_eq!(lazy.state(), ObjectState::Dirty);

        lazy.accept_server_state(json!({"id": 1, "name": "x"}).as_object().cloned().unwrap());
        assert_eq!(lazy.state(), ObjectState::Populated);
        assert!(!lazy.is_lazy());
    }

    #[test]
    fn test_child_manager_uses_object_attributes() {
        let parent = object(&FAKE, json!({"id": 42}));
        let child = parent.child_manager(&CHILD).unwrap();
        assert_eq!(child.path(), "/tests/42/children");

        let child_object = RestObject::new(&child, Map::new());
        assert_eq!(child_object.get("test_id"), Some(&json!(42)));
        assert_eq!(child_object.snapshot(true)["test_id"], json!(42));
    }

    #[test]
    fn test_singleton_path_is_collection_path() {
        let settings = object(&SINGLETON, json!({"level": "watch"}));
        assert_eq!(settings.path(), "/notification_settings");
        assert_eq!(settings.encoded_id(), None);
    }

    #[test]
    fn test_to_typed_reads_merged_attributes() {
        #[derive(serde::Deserialize)]
        struct Child {
            id: u64,
            test_id: u64,
            name: String,
        }

        let parent = object(&FAKE, json!({"id": 42}));
        let child = parent.child_manager(&CHILD).unwrap();
        let attrs = json!({"id": 7, "name": "old"});
        let mut object = RestObject::new(&child, attrs.as_object().cloned().unwrap());
        object.write("name", "new");

        let typed: Child = object.to_typed().unwrap();
        assert_eq!((typed.id, typed.test_id, typed.name.as_str()), (7, 42, "new"));
        assert!(!object.to_json().contains("test_id"));
    }
}
