//! Profile Compiler
//!
//! Assembles artifacts and releases of the selected projects into one
//! `Profile` per configuration key.
//!
//! ## Invariants
//!
//! - The key universe is the union of `BuildSpec.configurations` keys of the
//!   selected projects. Deploy-only keys never produce a profile.
//! - A project only contributes to the keys its own build configurations
//!   declare, both artifacts and releases.
//! - A profile without artifacts is dropped, whatever its deployment holds.
//! - Profiles come out in key order, projects in name order within a profile.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::entities::{Profile, Project, WorkspaceModel};
use crate::domain::ports::{FileSystem, ReleasePlan};
use crate::domain::services::artifact_compiler::compile_artifact;
use crate::domain::services::producer_registry::ProducerRegistry;
use crate::domain::services::release_compiler::compile_releases;
use crate::domain::value_objects::Platform;
use crate::error::ModelError;

/// Caller-supplied compilation settings
#[derive(Debug, Clone, Default)]
pub struct CompileSettings {
    /// Target platform for image builds
    pub platform: Platform,
    /// Registry that beats every workspace-level registry (`--registry`)
    pub registry_override: Option<String>,
    /// Registry used when nothing in the workspace names one
    pub default_registry: Option<String>,
    /// Directory containing the workspace document; value-file paths are relative to it
    pub workspace_root: PathBuf,
}

impl CompileSettings {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            ..Default::default()
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_registry_override(mut self, registry: Option<String>) -> Self {
        self.registry_override = registry;
        self
    }

    pub fn with_default_registry(mut self, registry: Option<String>) -> Self {
        self.default_registry = registry;
        self
    }
}

/// Profile compiler
///
/// Borrows the producer table and the file system for the duration of a
/// compilation; holds no state of its own between calls.
pub struct ProfileCompiler<'a> {
    producers: &'a ProducerRegistry,
    fs: &'a dyn FileSystem,
    settings: &'a CompileSettings,
}

impl<'a> ProfileCompiler<'a> {
    pub fn new(
        producers: &'a ProducerRegistry,
        fs: &'a dyn FileSystem,
        settings: &'a CompileSettings,
    ) -> Self {
        Self {
            producers,
            fs,
            settings,
        }
    }

    /// Compile profiles for `selected` projects (every project when empty).
    pub fn compile(
        &self,
        workspace: &WorkspaceModel,
        selected: &[String],
    ) -> Result<Vec<Profile>, ModelError> {
        let projects = select_projects(workspace, selected)?;
        let keys = configuration_keys(&projects);

        let profiles = keys
            .into_iter()
            .filter_map(|key| {
                let profile = self.compile_key(workspace, &projects, &key);
                if profile.artifacts.is_empty() {
                    tracing::debug!(profile = %key, "no artifacts; dropping profile");
                    None
                } else {
                    if profile.deployment.is_empty() {
                        tracing::debug!(profile = %key, "profile has artifacts but nothing to deploy");
                    }
                    Some(profile)
                }
            })
            .collect();

        Ok(profiles)
    }

    fn compile_key(&self, workspace: &WorkspaceModel, projects: &[&Project], key: &str) -> Profile {
        let mut profile = Profile::new(key);

        for project in projects.iter().filter(|p| declares_key(p, key)) {
            if let Some(artifact) =
                compile_artifact(self.producers, workspace, project, key, self.settings)
            {
                profile.artifacts.push(artifact);
            }

            match compile_releases(
                self.producers,
                workspace,
                project,
                key,
                &self.settings.workspace_root,
                self.fs,
            ) {
                Some(ReleasePlan::Releases(releases)) => {
                    profile.deployment.releases.extend(releases)
                }
                Some(ReleasePlan::ProviderSetup(setup)) => {
                    profile.deployment.provider_setup.push(setup)
                }
                None => {}
            }
        }

        profile
    }
}

/// Resolve a project selection in name order. Empty selects every project.
pub fn select_projects<'w>(
    workspace: &'w WorkspaceModel,
    selected: &[String],
) -> Result<Vec<&'w Project>, ModelError> {
    if selected.is_empty() {
        return Ok(workspace.projects.values().collect());
    }

    let names: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
    names
        .into_iter()
        .map(|name| workspace.project(name))
        .collect()
}

fn declares_key(project: &Project, key: &str) -> bool {
    project
        .build()
        .is_some_and(|build| build.configurations.contains_key(key))
}

/// Union of build configuration keys, sorted.
pub fn configuration_keys(projects: &[&Project]) -> BTreeSet<String> {
    projects
        .iter()
        .filter_map(|p| p.build())
        .flat_map(|b| b.configurations.keys().cloned())
        .collect()
}

/// Convenience wrapper over `ProfileCompiler`.
pub fn compile_profiles(
    producers: &ProducerRegistry,
    fs: &dyn FileSystem,
    settings: &CompileSettings,
    workspace: &WorkspaceModel,
    selected: &[String],
) -> Result<Vec<Profile>, ModelError> {
    ProfileCompiler::new(producers, fs, settings).compile(workspace, selected)
}
