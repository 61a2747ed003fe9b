//! Change-tracking attribute storage for resource objects.
//!
//! An [`AttributeStore`] keeps three layers of attributes:
//!
//! - **server**: the representation last received from the server
//! - **overrides**: values written locally since the last sync
//! - **parent**: values inherited from the owning manager (read-only)
//!
//! Reads look at the layers in that priority order: overrides, then server,
//! then parent. Writes always land in the overrides, which is what makes
//! partial updates possible: [`AttributeStore::updated_attrs`] is exactly the
//! set of changes to send.
//!
//! # Arrays
//!
//! An array read from the server layer is copied into the overrides on first
//! access. Mutating it in place through [`AttributeStore::read_mut`] is then
//! visible to later reads and to `save()`.
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::rest::AttributeStore;
//! use serde_json::{json, Map};
//!
//! let server = json!({"id": 1, "title": "old", "labels": ["bug"]});
//! let mut store = AttributeStore::new(server.as_object().cloned().unwrap(), Map::new());
//!
//! store.write("title", json!("new"));
//! assert_eq!(store.read("title"), Some(&json!("new")));
//!
//! if let Some(labels) = store.read_mut("labels").and_then(|v| v.as_array_mut()) {
//!     labels.push(json!("ui"));
//! }
//! assert_eq!(store.read("labels"), Some(&json!(["bug", "ui"])));
//! assert!(store.is_dirty());
//! ```

use serde_json::{Map, Value};

/// Layered attribute storage with change tracking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeStore {
    server: Map<String, Value>,
    overrides: Map<String, Value>,
    parent: Map<String, Value>,
}

impl AttributeStore {
    /// Creates a store from server attributes and parent-bound attributes.
    #[must_use]
    pub fn new(server: Map<String, Value>, parent: Map<String, Value>) -> Self {
        Self {
            server,
            overrides: Map::new(),
            parent,
        }
    }

    /// Reads an attribute.
    ///
    /// An array found only in the server layer is copied into the overrides
    /// before it is returned. Returns `None` when no layer holds `name`.
    pub fn read(&mut self, name: &str) -> Option<&Value> {
        self.promote_array(name);
        self.overrides
            .get(name)
            .or_else(|| self.server.get(name))
            .or_else(|| self.parent.get(name))
    }

    /// Returns a mutable handle to an attribute.
    ///
    /// A server value is copied into the overrides first, so every change
    /// made through the handle is tracked. Parent attributes are read-only
    /// and yield `None`.
    pub fn read_mut(&mut self, name: &str) -> Option<&mut Value> {
        if !self.overrides.contains_key(name) {
            let value = self.server.get(name)?.clone();
            self.overrides.insert(name.to_string(), value);
        }
        self.overrides.get_mut(name)
    }

    /// Looks an attribute up without any side effect.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.overrides
            .get(name)
            .or_else(|| self.server.get(name))
            .or_else(|| self.parent.get(name))
    }

    /// Returns `true` if any layer holds `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stores a value in the overrides.
    pub fn write(&mut self, name: impl Into<String>, value: Value) {
        self.overrides.insert(name.into(), value);
    }

    /// Returns a merged copy of the attributes.
    ///
    /// Later layers win: parent (when requested), then server, then
    /// overrides.
    #[must_use]
    pub fn snapshot(&self, include_parent_attrs: bool) -> Map<String, Value> {
        let mut merged = if include_parent_attrs {
            self.parent.clone()
        } else {
            Map::new()
        };
        merged.extend(self.server.clone());
        merged.extend(self.overrides.clone());
        merged
    }

    /// Replaces the server attributes and drops every local change.
    pub fn accept_server_state(&mut self, attrs: Map<String, Value>) {
        self.server = attrs;
        self.overrides.clear();
    }

    /// Returns the local changes since the last sync.
    #[must_use]
    pub const fn updated_attrs(&self) -> &Map<String, Value> {
        &self.overrides
    }

    /// Returns the attributes last received from the server.
    #[must_use]
    pub const fn server_attrs(&self) -> &Map<String, Value> {
        &self.server
    }

    /// Returns the attributes inherited from the owning manager.
    #[must_use]
    pub const fn parent_attrs(&self) -> &Map<String, Value> {
        &self.parent
    }

    /// Returns `true` if there are local changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.overrides.is_empty()
    }

    fn promote_array(&mut self, name: &str) {
        if self.overrides.contains_key(name) {
            return;
        }
        if let Some(value) = self.server.get(name).filter(|v| v.is_array()).cloned() {
            self.overrides.insert(name.to_string(), value);
        }
    }
}

// Verify AttributeStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AttributeStore>();
};
