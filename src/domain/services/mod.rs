//! Domain Services
//!
//! Pure compilation logic over the workspace model. The only I/O is the
//! secrets-overlay existence check, which goes through the `FileSystem` port.

pub mod artifact_compiler;
pub mod producer_registry;
pub mod profile_compiler;
pub mod release_compiler;
pub mod resolver;

pub use artifact_compiler::{compile_artifact, ImageArtifactProducer, StaticBundleProducer};
pub use producer_registry::{ProducerRegistry, BUNDLE_BUILDERS, IMAGE_BUILDERS};
pub use profile_compiler::{
    compile_profiles, configuration_keys, select_projects, CompileSettings, ProfileCompiler,
};
pub use release_compiler::{compile_releases, ChartReleaseProducer, ProviderSetupProducer};
pub use resolver::{resolve_settings, Overrides, ResolvedSettings};
