//! Behaviour of the identifier reader and writer on whole manifests.

use app_identity::{
	AppIdentity, IdentityConfig, MalformedResourceError, Resource, DEFAULT_LEGACY_MARKER_KEY,
	INSTANCE_MARKER_KEY,
};
use assert_matches::assert_matches;
use rstest::{fixture, rstest};
use serde_json::{json, Value};

const LEGACY: &str = DEFAULT_LEGACY_MARKER_KEY;

#[fixture]
fn identity() -> AppIdentity {
	AppIdentity::new(IdentityConfig::default())
}

fn manifest(api_version: &str, kind: &str) -> Resource {
	serde_json::from_value(json!({
		"apiVersion": api_version,
		"kind": kind,
		"metadata": {
			"name": "guestbook-ui",
			"annotations": { "deployment.kubernetes.io/revision": "4" }
		},
		"spec": {
			"template": {
				"metadata": { "labels": { "app": "guestbook-ui" } },
				"spec": { "containers": [{ "name": "ui", "image": "guestbook:v1" }] }
			}
		}
	}))
	.unwrap()
}

fn template_annotations(resource: &Resource) -> Option<Value> {
	resource
		.nested_map(&["spec", "template", "metadata", "annotations"])
		.unwrap()
		.map(|m| Value::Object(m.clone()))
}

#[rstest]
#[case(LEGACY)]
#[case(INSTANCE_MARKER_KEY)]
fn test_write_is_idempotent(identity: AppIdentity, #[case] key: &str) {
	let mut once = manifest("apps/v1", "Deployment");
	identity.write_identifier(&mut once, key, "guestbook").unwrap();

	let mut twice = once.clone();
	identity.write_identifier(&mut twice, key, "guestbook").unwrap();

	assert_eq!(once, twice);
}

#[rstest]
fn test_read_after_write(identity: AppIdentity) {
	let mut res = manifest("v1", "Service");
	identity
		.write_identifier(&mut res, INSTANCE_MARKER_KEY, "guestbook")
		.unwrap();
	assert_eq!(
		identity.read_identifier(&res, INSTANCE_MARKER_KEY),
		"guestbook"
	);
}

#[rstest]
fn test_write_keeps_unrelated_annotations(identity: AppIdentity) {
	let mut res = manifest("apps/v1", "Deployment");
	identity
		.write_identifier(&mut res, INSTANCE_MARKER_KEY, "guestbook")
		.unwrap();
	assert_eq!(
		identity.read_identifier(&res, "deployment.kubernetes.io/revision"),
		"4"
	);
}

#[rstest]
fn test_propagation_gated_by_key(identity: AppIdentity) {
	let mut res = manifest("apps/v1", "Deployment");

	identity.write_identifier(&mut res, "team", "x").unwrap();
	assert_eq!(template_annotations(&res), None);

	identity.write_identifier(&mut res, LEGACY, "x").unwrap();
	assert_eq!(template_annotations(&res), Some(json!({ LEGACY: "x" })));
}

#[rstest]
fn test_propagation_gated_by_kind(identity: AppIdentity) {
	let mut res: Resource = serde_json::from_value(json!({
		"apiVersion": "v1",
		"kind": "ConfigMap",
		"metadata": { "name": "settings" },
		"data": { "color": "blue" }
	}))
	.unwrap();

	identity.write_identifier(&mut res, LEGACY, "x").unwrap();

	assert_eq!(identity.read_identifier(&res, LEGACY), "x");
	assert!(!res.as_map().contains_key("spec"));
}

#[rstest]
fn test_job_without_template_metadata(identity: AppIdentity) {
	let mut res = Resource::new("batch/v1", "Job");
	identity.write_identifier(&mut res, LEGACY, "x").unwrap();
	assert_eq!(template_annotations(&res), Some(json!({ LEGACY: "x" })));
}

#[rstest]
#[case("apps/v1", "Deployment", true)]
#[case("apps/v1", "ReplicaSet", true)]
#[case("apps/v1", "StatefulSet", true)]
#[case("apps/v1", "DaemonSet", true)]
#[case("extensions/v1beta1", "ReplicaSet", true)]
#[case("batch/v1", "Job", true)]
#[case("batch/v1", "CronJob", false)]
#[case("v1", "Pod", false)]
#[case("example.com/v1alpha1", "Deployment", false)]
fn test_kind_coverage(
	identity: AppIdentity,
	#[case] api_version: &str,
	#[case] kind: &str,
	#[case] propagates: bool,
) {
	let mut res = manifest(api_version, kind);
	identity.write_identifier(&mut res, LEGACY, "x").unwrap();
	assert_eq!(template_annotations(&res).is_some(), propagates);
	assert_eq!(identity.read_identifier(&res, LEGACY), "x");
}

#[rstest]
fn test_read_on_unset(identity: AppIdentity) {
	let res = Resource::default();
	assert_eq!(identity.read_identifier(&res, INSTANCE_MARKER_KEY), "");
	assert_eq!(identity.read_identifier(&res, LEGACY), "");
}

#[rstest]
fn test_malformed_template_is_partial_success(identity: AppIdentity) {
	let mut res: Resource = serde_json::from_value(json!({
		"apiVersion": "apps/v1",
		"kind": "StatefulSet",
		"spec": { "template": { "metadata": "broken" } }
	}))
	.unwrap();

	let result = identity.write_identifier(&mut res, LEGACY, "x");

	assert_matches!(
		result,
		Err(MalformedResourceError { ref path, found: "string" }) if path == "spec.template.metadata"
	);
	assert_eq!(
		result.unwrap_err().to_string(),
		"`spec.template.metadata` is of type string, expected mapping"
	);
	assert_eq!(identity.read_identifier(&res, LEGACY), "x");
	assert_eq!(res.into_value()["spec"]["template"]["metadata"], "broken");
}
