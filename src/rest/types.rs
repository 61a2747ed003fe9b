//! Declarative attribute contracts and attribute type conversions.
//!
//! [`RequiredOptional`] describes which attributes a create or update call
//! must, may, or must exclusively carry. [`AttributeType`] marks attributes
//! that need special encoding on the wire.

use serde_json::{Map, Value};

use crate::clients::FilePart;
use crate::rest::errors::ValidationError;

/// Required, optional and mutually exclusive attributes of a call.
///
/// # Example
///
/// ```rust
/// use gitlab_api::rest::RequiredOptional;
/// use serde_json::json;
///
/// const ATTRS: RequiredOptional = RequiredOptional::new(&["title"], &["labels"]);
///
/// let data = json!({"labels": "bug"});
/// let err = ATTRS.validate(data.as_object().unwrap(), None).unwrap_err();
/// assert_eq!(err.to_string(), "Missing attributes: title");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequiredOptional {
    /// Attributes that must be present.
    pub required: &'static [&'static str],
    /// Attributes that may be present.
    pub optional: &'static [&'static str],
    /// Attributes of which exactly one must be present.
    pub exclusive: &'static [&'static str],
}

impl RequiredOptional {
    /// No constraints.
    pub const EMPTY: Self = Self {
        required: &[],
        optional: &[],
        exclusive: &[],
    };

    /// Creates a contract with required and optional attributes.
    #[must_use]
    pub const fn new(
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            required,
            optional,
            exclusive: &[],
        }
    }

    /// Adds an exclusive group to the contract.
    #[must_use]
    pub const fn with_exclusive(mut self, exclusive: &'static [&'static str]) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Checks `data` against the contract.
    ///
    /// `exclude` names a required attribute that is carried elsewhere (the
    /// id in an update URL) and must not be demanded in the body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequired`] listing every missing
    /// attribute, or [`ValidationError::ExclusiveConflict`] /
    /// [`ValidationError::ExclusiveMissing`] when the exclusive group is
    /// violated.
    pub fn validate(
        &self,
        data: &Map<String, Value>,
        exclude: Option<&str>,
    ) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| Some(**name) != exclude)
            .filter(|name| !data.contains_key(**name))
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired { missing });
        }

        if !self.exclusive.is_empty() {
            let provided: Vec<String> = data
                .keys()
                .filter(|key| self.exclusive.contains(&key.as_str()))
                .cloned()
                .collect();
            if provided.len() > 1 {
                return Err(ValidationError::ExclusiveConflict { provided });
            }
            if provided.is_empty() {
                return Err(ValidationError::ExclusiveMissing {
                    choices: self.exclusive.iter().map(|s| (*s).to_string()).collect(),
                });
            }
        }

        Ok(())
    }
}

/// Wire encoding of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    /// Sent in query strings as repeated `name[]=value` pairs.
    Array,
    /// Sent in query strings as a single comma-joined value.
    CommaSeparatedList,
    /// Sent lower-cased.
    LowercaseString,
    /// Uploaded as a multipart file named after the attribute.
    File,
    /// Uploaded as a multipart file named `<attribute>.png`.
    Image,
}

impl AttributeType {
    /// Returns `true` for attributes uploaded as files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File | Self::Image)
    }

    /// Returns the upload file name for attribute `name`.
    #[must_use]
    pub fn file_name(&self, name: &str) -> String {
        match self {
            Self::Image => format!("{name}.png"),
            _ => name.to_string(),
        }
    }
}

/// Looks up the declared type of `name`.
pub(crate) fn type_of(types: &[(&'static str, AttributeType)], name: &str) -> Option<AttributeType> {
    types
        .iter()
        .find(|(attr, _)| *attr == name)
        .map(|(_, kind)| *kind)
}

/// Renders a scalar the way it appears in a query string.
pub(crate) fn query_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Converts list filters into query pairs, applying attribute types.
///
/// `Null` values are skipped; untyped arrays repeat the key.
pub(crate) fn to_query(
    params: &Map<String, Value>,
    types: &[(&'static str, AttributeType)],
) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len());

    for (key, value) in params {
        if value.is_null() {
            continue;
        }
        match (type_of(types, key), value) {
            (Some(AttributeType::Array), Value::Array(items)) => {
                let key = format!("{key}[]");
                query.extend(items.iter().map(|item| (key.clone(), query_text(item))));
            }
            (Some(AttributeType::Array), scalar) => {
                query.push((format!("{key}[]"), query_text(scalar)));
            }
            (Some(AttributeType::CommaSeparatedList), Value::Array(items)) => {
                let joined = items.iter().map(query_text).collect::<Vec<_>>().join(",");
                query.push((key.clone(), joined));
            }
            (Some(AttributeType::LowercaseString), scalar) => {
                query.push((key.clone(), query_text(scalar).to_lowercase()));
            }
            (_, Value::Array(items)) => {
                query.extend(items.iter().map(|item| (key.clone(), query_text(item))));
            }
            (_, scalar) => query.push((key.clone(), query_text(scalar))),
        }
    }

    query
}

/// Moves file-typed attributes out of `data` into multipart file parts.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFile`] if a file attribute is not a string.
pub(crate) fn split_files(
    mut data: Map<String, Value>,
    types: &[(&'static str, AttributeType)],
) -> Result<(Map<String, Value>, Vec<FilePart>), ValidationError> {
    let mut files = Vec::new();

    for (name, kind) in types.iter().filter(|(_, kind)| kind.is_file()) {
        let Some(value) = data.remove(*name) else {
            continue;
        };
        match value {
            Value::String(content) => files.push(FilePart {
                field: (*name).to_string(),
                filename: kind.file_name(name),
                content: content.into_bytes(),
            }),
            _ => {
                return Err(ValidationError::InvalidFile {
                    name: (*name).to_string(),
                })
            }
        }
    }

    Ok((data, files))
}
