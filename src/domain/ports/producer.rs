//! Producer ports - per-builder and per-deployer compilation behaviour
//!
//! Builder and deployer identifiers are looked up in a `ProducerRegistry`
//! constructed by the caller, so compilation never depends on implicit
//! registration order.

use std::path::Path;

use crate::domain::entities::{Project, ProviderSetup, Release, WorkspaceModel};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::OptionMap;

/// Decides whether a builder yields a container image, and where its build target lives.
pub trait ArtifactProducer: Send + Sync {
    /// Build target for `project`, `None` when this builder never produces a container image
    fn build_target(&self, project: &Project) -> Option<String>;
}

/// Everything a release producer needs for one project and configuration key
pub struct ReleaseRequest<'a> {
    pub workspace: &'a WorkspaceModel,
    pub project: &'a Project,
    pub key: &'a str,
    /// Deploy options merged with the configuration overlay
    pub options: &'a OptionMap,
    pub workspace_root: &'a Path,
    pub fs: &'a dyn FileSystem,
}

/// What a deployer contributes to a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePlan {
    Releases(Vec<Release>),
    ProviderSetup(ProviderSetup),
}

/// Turns a project's deploy spec into releases or a provider-setup marker.
pub trait ReleaseProducer: Send + Sync {
    fn plan(&self, request: &ReleaseRequest<'_>) -> ReleasePlan;
}
