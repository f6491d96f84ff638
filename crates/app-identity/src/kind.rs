//! Classification of resource kinds that embed a pod template.
//!
//! Controllers such as Deployments or Jobs create child objects from `spec.template`.
//! Markers that must be visible on those children have to be copied into the template,
//! so writers need to know which kinds carry one.

use phf::phf_map;

use crate::resource::Resource;

pub const APPS_GROUP: &str = "apps";
pub const EXTENSIONS_GROUP: &str = "extensions";
pub const BATCH_GROUP: &str = "batch";

pub const DEPLOYMENT_KIND: &str = "Deployment";
pub const REPLICA_SET_KIND: &str = "ReplicaSet";
pub const STATEFUL_SET_KIND: &str = "StatefulSet";
pub const DAEMON_SET_KIND: &str = "DaemonSet";
pub const JOB_KIND: &str = "Job";

/// How a kind relates to pod templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindClass {
	/// Workload controllers creating replicas: Deployment, ReplicaSet, StatefulSet, DaemonSet.
	DeploymentLike,
	/// Run-to-completion controllers: Job.
	JobLike,
	/// Everything else, including unknown kinds.
	Other,
}

impl KindClass {
	/// Whether objects of this class spawn children from `spec.template`.
	pub fn spawns_pod_template(self) -> bool {
		!matches!(self, KindClass::Other)
	}
}

const WORKLOAD_GROUPS: &[&str] = &[APPS_GROUP, EXTENSIONS_GROUP];
const BATCH_GROUPS: &[&str] = &[BATCH_GROUP];

/// Template-bearing kinds and the API groups they are recognized under.
static TEMPLATE_KINDS: phf::Map<&'static str, (KindClass, &'static [&'static str])> = phf_map! {
	"Deployment" => (KindClass::DeploymentLike, WORKLOAD_GROUPS),
	"ReplicaSet" => (KindClass::DeploymentLike, WORKLOAD_GROUPS),
	"StatefulSet" => (KindClass::DeploymentLike, WORKLOAD_GROUPS),
	"DaemonSet" => (KindClass::DeploymentLike, WORKLOAD_GROUPS),
	"Job" => (KindClass::JobLike, BATCH_GROUPS),
};

/// Classify a `(group, kind)` pair. Unknown pairs are [`KindClass::Other`].
pub fn classify(group: &str, kind: &str) -> KindClass {
	match TEMPLATE_KINDS.get(kind) {
		Some((class, groups)) if groups.iter().any(|g| *g == group) => *class,
		_ => KindClass::Other,
	}
}

/// Classify a resource by the group of its `apiVersion` and its `kind`.
pub fn classify_resource(resource: &Resource) -> KindClass {
	classify(&resource.group_version_kind().group, resource.kind())
}
