//! Path building infrastructure for REST resources.
//!
//! A resource declares its collection path as a template such as
//! `/projects/{project_id}/issues`. A nested manager fills each placeholder
//! from an attribute of its parent object, declared with a
//! [`ParentBinding`]. Every substituted value is percent-encoded as a single
//! path segment through [`EncodedId`].
//!
//! # Example
//!
//! ```rust
//! use gitlab_api::rest::{build_path, EncodedId};
//!
//! let path = build_path(
//!     "/projects/{project_id}/issues",
//!     &[("project_id", EncodedId::from("group/my project"))],
//! );
//! assert_eq!(path, "/projects/group%2Fmy%20project/issues");
//! ```

use std::fmt;

use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::types::{AttributeType, RequiredOptional};

/// An identifier ready to be used as one URL path segment.
///
/// Integers are used as-is; strings are percent-encoded once when wrapped.
/// Wrapping an `EncodedId` again is the identity, so values are never
/// double-encoded.
///
/// # Example
///
/// ```rust
/// use gitlab_api::rest::EncodedId;
///
/// let once = EncodedId::from("user@example.com/x");
/// let twice = EncodedId::from(once.clone());
/// assert_eq!(once, twice);
/// assert_eq!(once.to_string(), "user%40example.com%2Fx");
/// assert_eq!(EncodedId::from(42).to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EncodedId {
    /// An integer id.
    Int(i64),
    /// A percent-encoded string id.
    Encoded(String),
}

impl EncodedId {
    /// Builds an id from a JSON attribute value.
    ///
    /// Returns `None` for `null`, arrays and objects.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(n.as_i64().map_or_else(|| Self::from(n.to_string()), Self::Int)),
            Value::String(s) => Some(Self::from(s.as_str())),
            Value::Bool(b) => Some(Self::from(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the id as a JSON value, undoing the percent-encoding.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(id) => Value::from(*id),
            Self::Encoded(id) => Value::String(
                urlencoding::decode(id).map_or_else(|_| id.clone(), std::borrow::Cow::into_owned),
            ),
        }
    }
}

impl From<i64> for EncodedId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for EncodedId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for EncodedId {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for EncodedId {
    fn from(value: &str) -> Self {
        Self::Encoded(urlencoding::encode(value).into_owned())
    }
}

impl From<String> for EncodedId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&String> for EncodedId {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&EncodedId> for EncodedId {
    fn from(value: &EncodedId) -> Self {
        value.clone()
    }
}

impl fmt::Display for EncodedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Encoded(id) => f.write_str(id),
        }
    }
}

/// Binds a path placeholder to an attribute of the parent object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentBinding {
    /// The placeholder name in the path template, also the name under which
    /// the value is exposed on child objects.
    pub placeholder: &'static str,
    /// The attribute read off the parent.
    pub parent_attr: &'static str,
}

impl ParentBinding {
    /// Creates a binding.
    #[must_use]
    pub const fn new(placeholder: &'static str, parent_attr: &'static str) -> Self {
        Self {
            placeholder,
            parent_attr,
        }
    }
}

/// HTTP method used by a resource's update endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMethod {
    /// `PUT` (most resources).
    #[default]
    Put,
    /// `POST`.
    Post,
    /// `PATCH`.
    Patch,
}

impl UpdateMethod {
    /// Returns the HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Put => HttpMethod::Put,
            Self::Post => HttpMethod::Post,
            Self::Patch => HttpMethod::Patch,
        }
    }
}

/// Declarative metadata for one resource type.
///
/// Definitions are constants; override defaults with struct update syntax:
///
/// ```rust
/// use gitlab_api::rest::{ParentBinding, RequiredOptional, ResourceDef};
///
/// const ISSUE: ResourceDef = ResourceDef {
///     from_parent_attrs: &[ParentBinding::new("project_id", "id")],
///     id_attr: Some("iid"),
///     repr_attr: Some("title"),
///     create_attrs: RequiredOptional::new(&["title"], &["description"]),
///     ..ResourceDef::new("ProjectIssue", "/projects/{project_id}/issues")
/// };
///
/// assert_eq!(ISSUE.id_attr, Some("iid"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDef {
    /// Type name used in errors and `Display`.
    pub name: &'static str,
    /// Collection path template.
    pub path: &'static str,
    /// Placeholder bindings to parent attributes.
    pub from_parent_attrs: &'static [ParentBinding],
    /// The identifying attribute; `None` for singletons.
    pub id_attr: Option<&'static str>,
    /// Attribute shown by `Display` next to the id.
    pub repr_attr: Option<&'static str>,
    /// Create contract.
    pub create_attrs: RequiredOptional,
    /// Update contract.
    pub update_attrs: RequiredOptional,
    /// Method used by the update endpoint.
    pub update_method: UpdateMethod,
    /// Attributes with special wire encoding.
    pub types: &'static [(&'static str, AttributeType)],
}

impl ResourceDef {
    /// Creates a definition with an `id` attribute and no other metadata.
    #[must_use]
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            from_parent_attrs: &[],
            id_attr: Some("id"),
            repr_attr: None,
            create_attrs: RequiredOptional::EMPTY,
            update_attrs: RequiredOptional::EMPTY,
            update_method: UpdateMethod::Put,
            types: &[],
        }
    }
}

/// Builds a path by substituting `{placeholder}`s with encoded ids.
#[must_use]
pub fn build_path(template: &str, ids: &[(&str, EncodedId)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

/// Joins an item id onto a collection path.
#[must_use]
pub fn item_path(collection: &str, id: &EncodedId) -> String {
    format!("{collection}/{id}")
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EncodedId>();
    assert_send_sync::<ResourceDef>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_are_not_quoted() {
        assert_eq!(EncodedId::from(23).to_string(), "23");
        assert_eq!(EncodedId::from_value(&json!(42)), Some(EncodedId::Int(42)));
    }

    #[test]
    fn test_strings_are_encoded_as_one_segment() {
        assert_eq!(EncodedId::from("a/b c").to_string(), "a%2Fb%20c");
        assert_eq!(EncodedId::from("foo#bar@baz").to_string(), "foo%23bar%40baz");
        assert_eq!(EncodedId::from("v1.0-rc_1~x").to_string(), "v1.0-rc_1~x");
    }

    #[test]
    fn test_encoding_is_idempotent() {
        for raw in ["group/project", "a%2Fb", "spaces here", "plain", "100%"] {
            let once = EncodedId::from(raw);
            let twice = EncodedId::from(once.clone());
            let via_ref = EncodedId::from(&once);
            assert_eq!(once, twice, "double encoding changed {raw}");
            assert_eq!(once, via_ref);
        }
    }

    #[test]
    fn test_from_value_rejects_structured_values() {
        assert_eq!(EncodedId::from_value(&Value::Null), None);
        assert_eq!(EncodedId::from_value(&json!([1])), None);
        assert_eq!(
            EncodedId::from_value(&json!("ns/x")),
            Some(EncodedId::Encoded("ns%2Fx".to_string()))
        );
    }

    #[test]
    fn test_to_value_round_trips_through_encoding() {
        assert_eq!(EncodedId::from(5).to_value(), json!(5));
        let id = EncodedId::from("group/sub project");
        assert_eq!(id.to_value(), json!("group/sub project"));
        assert_eq!(EncodedId::from_value(&id.to_value()), Some(id));
    }

    #[test]
    fn test_build_path() {
        let path = build_path(
            "/projects/{project_id}/issues/{issue_iid}/notes",
            &[
                ("project_id", EncodedId::from("g/p")),
                ("issue_iid", EncodedId::from(7)),
            ],
        );
        assert_eq!(path, "/projects/g%2Fp/issues/7/notes");
        assert_eq!(item_path(&path, &EncodedId::from(3)), format!("{path}/3"));
    }

    #[test]
    fn test_resource_def_defaults() {
        const DEF: ResourceDef = ResourceDef::new("Thing", "/things");
        assert_eq!(DEF.id_attr, Some("id"));
        assert!(DEF.from_parent_attrs.is_empty());
        assert_eq!(DEF.update_method.http_method(), HttpMethod::Put);
    }
}
