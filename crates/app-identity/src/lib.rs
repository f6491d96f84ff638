//! Application identity markers for cluster resources.
//!
//! Resources are tagged with the application that owns them through an annotation. For the
//! legacy marker key, controllers that spawn pods from a template also get the marker copied
//! into `spec.template.metadata`, so generated pods remain attributable to the application.
//!
//! ```
//! use app_identity::{AppIdentity, Resource, DEFAULT_LEGACY_MARKER_KEY};
//!
//! let identity = AppIdentity::default();
//! let mut deployment = Resource::new("apps/v1", "Deployment");
//! identity
//! 	.write_identifier(&mut deployment, DEFAULT_LEGACY_MARKER_KEY, "guestbook")
//! 	.unwrap();
//!
//! assert_eq!(
//! 	identity.read_identifier(&deployment, DEFAULT_LEGACY_MARKER_KEY),
//! 	"guestbook"
//! );
//! ```

pub mod identity;
pub mod kind;
pub mod marker;
pub mod resource;

pub use identity::{
	app_instance_identifier, propagate_to_template, AppIdentity, IdentityConfig,
	DEFAULT_LEGACY_MARKER_KEY, INSTANCE_MARKER_KEY,
};
pub use kind::{classify, KindClass};
pub use marker::MetadataField;
pub use resource::{GroupVersionKind, MalformedResourceError, Resource};
