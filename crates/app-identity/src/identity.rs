//! Reading and writing the application instance identifier.
//!
//! The identifier always lives in `metadata.annotations`. For the legacy marker key it is
//! additionally copied into `spec.template.metadata.annotations` of template-bearing
//! controllers, so pods and replicas created from the template can be traced back to the
//! owning application.

use serde::Deserialize;
use serde_json::Value;

use crate::{
	kind::classify_resource,
	marker::{annotation_marker, set_annotation_marker, MetadataField},
	resource::{MalformedResourceError, Resource},
};

/// Recommended Kubernetes label for the instance of an application.
pub const INSTANCE_MARKER_KEY: &str = "app.kubernetes.io/instance";

/// Marker key used by the older labeling convention, which also tagged pod templates.
pub const DEFAULT_LEGACY_MARKER_KEY: &str = "applications.argoproj.io/app-name";

/// Process-wide identity tagging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityConfig {
	/// The only marker key that is propagated into pod templates.
	#[serde(default = "default_legacy_marker_key")]
	pub legacy_marker_key: String,
}

fn default_legacy_marker_key() -> String {
	DEFAULT_LEGACY_MARKER_KEY.to_string()
}

impl Default for IdentityConfig {
	fn default() -> Self {
		Self {
			legacy_marker_key: default_legacy_marker_key(),
		}
	}
}

/// Stamps and reads application ownership on resources.
#[derive(Debug, Clone, Default)]
pub struct AppIdentity {
	config: IdentityConfig,
}

impl AppIdentity {
	pub fn new(config: IdentityConfig) -> Self {
		Self { config }
	}

	pub fn legacy_marker_key(&self) -> &str {
		&self.config.legacy_marker_key
	}

	/// Identifier stored under `key`, or `""` when unset.
	pub fn read_identifier<'r>(&self, resource: &'r Resource, key: &str) -> &'r str {
		app_instance_identifier(resource, key)
	}

	/// Record `val` under `key` in the resource annotations.
	///
	/// For the legacy marker key the value is also written into the pod template of
	/// template-bearing kinds. The top-level annotation is kept even if that second step
	/// fails.
	pub fn write_identifier(
		&self,
		resource: &mut Resource,
		key: &str,
		val: &str,
	) -> Result<(), MalformedResourceError> {
		set_annotation_marker(resource, key, val);

		if key != self.config.legacy_marker_key {
			return Ok(());
		}

		propagate_to_template(resource, MetadataField::Annotations, key, val)
	}
}

/// Application instance identifier of a resource.
///
/// Only annotations are consulted; labels are never used as a fallback.
pub fn app_instance_identifier<'r>(resource: &'r Resource, key: &str) -> &'r str {
	annotation_marker(resource, key)
}

/// Copy `key: val` into `spec.template.metadata.<parent>` for template-bearing kinds.
///
/// Other kinds are left untouched. A missing template map is created; unrelated entries in
/// an existing one are kept.
pub fn propagate_to_template(
	resource: &mut Resource,
	parent: MetadataField,
	key: &str,
	val: &str,
) -> Result<(), MalformedResourceError> {
	let class = classify_resource(resource);
	if !class.spawns_pod_template() {
		tracing::trace!(kind = resource.kind(), key, "kind has no pod template, skipping");
		return Ok(());
	}

	let path = ["spec", "template", "metadata", parent.as_str()];

	let mut values = resource.nested_map(&path)?.cloned().unwrap_or_default();
	values.insert(key.to_string(), Value::String(val.to_string()));
	resource.set_nested_map(values, &path)?;

	tracing::trace!(
		kind = resource.kind(),
		?class,
		key,
		%parent,
		"propagated marker to pod template"
	);
	Ok(())
}
