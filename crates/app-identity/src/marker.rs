//! Single-key access to a resource's top-level annotations and labels.

use std::fmt;

use serde_json::{Map, Value};

use crate::resource::Resource;

/// Metadata map a marker is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
	Annotations,
	Labels,
}

impl MetadataField {
	/// JSON key of the map under `metadata`.
	pub fn as_str(self) -> &'static str {
		match self {
			MetadataField::Annotations => "annotations",
			MetadataField::Labels => "labels",
		}
	}
}

impl fmt::Display for MetadataField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Value of `key` in `metadata.annotations`, or `""` when unset.
pub fn annotation_marker<'r>(resource: &'r Resource, key: &str) -> &'r str {
	marker(resource, MetadataField::Annotations, key)
}

/// Value of `key` in `metadata.labels`, or `""` when unset.
pub fn label_marker<'r>(resource: &'r Resource, key: &str) -> &'r str {
	marker(resource, MetadataField::Labels, key)
}

/// Set `key` in `metadata.annotations`, keeping every other entry.
pub fn set_annotation_marker(resource: &mut Resource, key: &str, val: &str) {
	set_marker(resource, MetadataField::Annotations, key, val);
}

/// Set `key` in `metadata.labels`, keeping every other entry.
pub fn set_label_marker(resource: &mut Resource, key: &str, val: &str) {
	set_marker(resource, MetadataField::Labels, key, val);
}

fn marker<'r>(resource: &'r Resource, field: MetadataField, key: &str) -> &'r str {
	resource
		.nested_map(&["metadata", field.as_str()])
		.ok()
		.flatten()
		.and_then(|map| map.get(key))
		.and_then(Value::as_str)
		.unwrap_or_default()
}

fn set_marker(resource: &mut Resource, field: MetadataField, key: &str, val: &str) {
	let body = resource.body_mut();
	let mut metadata = take_mapping(body, "metadata");
	let mut markers = take_mapping(&mut metadata, field.as_str());
	markers.insert(key.to_string(), Value::String(val.to_string()));
	metadata.insert(field.as_str().to_string(), Value::Object(markers));
	body.insert("metadata".to_string(), Value::Object(metadata));
}

/// Take the mapping stored under `field`, leaving `null` in its place.
///
/// Anything that is not a mapping is discarded, so setting a marker cannot fail.
fn take_mapping(parent: &mut Map<String, Value>, field: &str) -> Map<String, Value> {
	match parent.get_mut(field).map(Value::take) {
		Some(Value::Object(map)) => map,
		None | Some(Value::Null) => Map::new(),
		Some(other) => {
			tracing::debug!(field, found = %other, "replacing malformed metadata field");
			Map::new()
		}
	}
}
