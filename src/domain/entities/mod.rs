//! Domain Entities
//!
//! - `WorkspaceModel` - projects, environments and infrastructure defaults
//! - `Profile` - compiled artifacts and releases for one configuration key

mod profile;
mod workspace;

pub use profile::{Artifact, Deployment, Profile, ProviderSetup, Release};
pub use workspace::{
    Architect, BuildSpec, ConfigurationKey, DeploySpec, EnvironmentDefaults, Extra, Project,
    ProviderDefaults, WorkspaceBuild, WorkspaceInfo, WorkspaceModel, DEPLOYER_METADATA_KEY,
    WORKSPACE_VERSION,
};
