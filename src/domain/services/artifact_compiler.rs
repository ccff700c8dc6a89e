//! Artifact compiler
//!
//! Produces at most one container-image build descriptor per project and
//! configuration key.

use crate::domain::entities::{Artifact, Project, WorkspaceModel};
use crate::domain::ports::ArtifactProducer;
use crate::domain::services::producer_registry::ProducerRegistry;
use crate::domain::services::resolver::resolve_registry;
use crate::domain::services::CompileSettings;
use crate::domain::value_objects::merge_options;

/// Image target for builders that compile straight to a container image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageArtifactProducer;

impl ArtifactProducer for ImageArtifactProducer {
    fn build_target(&self, project: &Project) -> Option<String> {
        Some(image_build_target(&project.root, &project.language))
    }
}

/// Builders producing a static bundle; never a container artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBundleProducer;

impl ArtifactProducer for StaticBundleProducer {
    fn build_target(&self, _project: &Project) -> Option<String> {
        None
    }
}

/// Build target label for a project root and language.
///
/// Go services keep their entrypoint under `cmd/server`; every other
/// language, known or not, builds a flat image target at the project root.
pub fn image_build_target(root: &str, language: &str) -> String {
    let root = root.trim().trim_start_matches("./").trim_matches('/');
    let package = match (language, root.is_empty()) {
        ("go", true) => "cmd/server".to_string(),
        ("go", false) => format!("{}/cmd/server", root),
        (_, _) => root.to_string(),
    };
    format!("//{}:image", package)
}

/// `registry/project`, or the bare project name without a registry.
pub fn image_name(registry: &str, project: &str) -> String {
    let registry = registry.trim().trim_end_matches('/');
    if registry.is_empty() {
        project.to_string()
    } else {
        format!("{}/{}", registry, project)
    }
}

/// Flag naming the configuration the build tool should apply.
pub fn config_flag(key: &str) -> String {
    format!("--config={}", key)
}

/// Compile the artifact for `project` under configuration `key`.
///
/// Returns `None` when the project has no build spec, the builder is not
/// registered, or the builder does not produce container images.
pub fn compile_artifact(
    producers: &ProducerRegistry,
    workspace: &WorkspaceModel,
    project: &Project,
    key: &str,
    settings: &CompileSettings,
) -> Option<Artifact> {
    let build = project.build()?;

    let Some(producer) = producers.artifact_producer(&build.builder) else {
        tracing::warn!(
            project = %project.name,
            builder = %build.builder,
            "no artifact producer registered for builder; skipping"
        );
        return None;
    };

    let Some(build_target) = producer.build_target(project) else {
        tracing::debug!(
            project = %project.name,
            builder = %build.builder,
            "builder does not produce a container image"
        );
        return None;
    };

    let options = merge_options(&build.options, build.configurations.get(key));
    let registry = resolve_registry(
        workspace,
        key,
        settings.registry_override.as_deref(),
        &options,
        settings
            .default_registry
            .as_deref()
            .or_else(|| workspace.default_registry()),
    );

    let mut build_args = settings.platform.build_flags();
    build_args.push(config_flag(key));

    Some(Artifact {
        project: project.name.clone(),
        image_name: image_name(&registry, &project.name),
        build_target,
        build_args,
    })
}
