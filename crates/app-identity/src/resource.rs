//! In-memory representation of a single cluster object.
//!
//! A [`Resource`] is a JSON mapping as produced by manifest evaluation or returned by the API
//! server. Only the pieces needed for identity tagging are exposed as typed accessors; the rest
//! of the tree is reachable through the nested-path helpers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A value along a nested path was present but was not a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{path}` is of type {found}, expected mapping")]
pub struct MalformedResourceError {
	/// Dotted path of the offending value, empty for the resource root.
	pub path: String,
	/// JSON type name of the value found there.
	pub found: &'static str,
}

impl MalformedResourceError {
	fn at(path: &[&str], value: &Value) -> Self {
		Self {
			path: path.join("."),
			found: json_type_name(value),
		}
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "mapping",
	}
}

/// Group, version and kind of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionKind {
	/// API group, empty for the core group.
	pub group: String,
	pub version: String,
	pub kind: String,
}

impl GroupVersionKind {
	/// Split an `apiVersion` string into group and version.
	///
	/// `apps/v1` has group `apps`; `v1` belongs to the core group (empty string).
	pub fn from_api_version_and_kind(api_version: &str, kind: &str) -> Self {
		let (group, version) = match api_version.split_once('/') {
			Some((g, v)) => (g, v),
			None => ("", api_version),
		};
		Self {
			group: group.to_string(),
			version: version.to_string(),
			kind: kind.to_string(),
		}
	}
}

/// A cluster object whose root is guaranteed to be a mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
	/// Create an otherwise empty resource with `apiVersion` and `kind` set.
	pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
		let mut body = Map::new();
		body.insert("apiVersion".to_string(), Value::String(api_version.into()));
		body.insert("kind".to_string(), Value::String(kind.into()));
		Self(body)
	}

	/// `apiVersion`, or an empty string when missing.
	pub fn api_version(&self) -> &str {
		self.0
			.get("apiVersion")
			.and_then(Value::as_str)
			.unwrap_or_default()
	}

	/// `kind`, or an empty string when missing.
	pub fn kind(&self) -> &str {
		self.0.get("kind").and_then(Value::as_str).unwrap_or_default()
	}

	pub fn group_version_kind(&self) -> GroupVersionKind {
		GroupVersionKind::from_api_version_and_kind(self.api_version(), self.kind())
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	/// Look up the mapping at `path`.
	///
	/// Returns `Ok(None)` when a segment is missing or `null`, and an error when a present
	/// value along the path is not a mapping.
	pub fn nested_map(
		&self,
		path: &[&str],
	) -> Result<Option<&Map<String, Value>>, MalformedResourceError> {
		let mut current = &self.0;
		for (depth, field) in path.iter().enumerate() {
			match current.get(*field) {
				None | Some(Value::Null) => return Ok(None),
				Some(Value::Object(map)) => current = map,
				Some(other) => return Err(MalformedResourceError::at(&path[..=depth], other)),
			}
		}
		Ok(Some(current))
	}

	/// Store `map` at `path`, creating missing intermediate mappings.
	///
	/// An empty path is a no-op. Fails when an ancestor segment holds a non-mapping value.
	pub fn set_nested_map(
		&mut self,
		map: Map<String, Value>,
		path: &[&str],
	) -> Result<(), MalformedResourceError> {
		let Some((last, ancestors)) = path.split_last() else {
			return Ok(());
		};
		let mut current = &mut self.0;
		for (depth, field) in ancestors.iter().enumerate() {
			let slot = current
				.entry(field.to_string())
				.or_insert_with(|| Value::Object(Map::new()));
			if slot.is_null() {
				*slot = Value::Object(Map::new());
			}
			current = match slot {
				Value::Object(inner) => inner,
				other => return Err(MalformedResourceError::at(&path[..=depth], other)),
			};
		}
		current.insert(last.to_string(), Value::Object(map));
		Ok(())
	}

	pub(crate) fn body_mut(&mut self) -> &mut Map<String, Value> {
		&mut self.0
	}
}

impl TryFrom<Value> for Resource {
	type Error = MalformedResourceError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(MalformedResourceError::at(&[], &other)),
		}
	}
}

impl From<Resource> for Value {
	fn from(resource: Resource) -> Self {
		resource.into_value()
	}
}
