//! Workspace entity - the declarative multi-project model
//!
//! Mirrors the persisted `keel.json` document. Unknown keys are kept in the
//! `extra` maps so a load/save cycle never drops data owned by other tools.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Deployer, OptionMap};
use crate::error::ModelError;

/// Current workspace document version
pub const WORKSPACE_VERSION: u32 = 1;

/// Project metadata entry recording the deployer workflows are generated for
pub const DEPLOYER_METADATA_KEY: &str = "deployer";

/// Configuration key naming a build/deploy variant ("production", "local", …)
pub type ConfigurationKey = String;

/// Unknown document keys preserved across load/save
pub type Extra = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceModel {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub workspace: WorkspaceInfo,
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
    #[serde(default)]
    pub build: WorkspaceBuild,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentDefaults>,
    #[serde(default)]
    pub infrastructure: BTreeMap<String, ProviderDefaults>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn default_version() -> u32 {
    WORKSPACE_VERSION
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Workspace-wide build defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceBuild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Per-environment defaults, keyed by environment name in the workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Per-provider infrastructure defaults (`kubernetes`, `gcp`, `firebase`, …)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Filled from the `projects` map key on load
    #[serde(skip)]
    pub name: String,
    /// Workspace-relative root directory
    pub root: String,
    /// Language tag (`go`, `node-service`, `angular`, `vue`, …)
    #[serde(rename = "type", default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Architect::is_empty")]
    pub architect: Architect,
    /// Developer-loop overrides keyed by deploy target
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub local: BTreeMap<String, OptionMap>,
    #[serde(default)]
    pub metadata: OptionMap,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Architect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<DeploySpec>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Architect {
    fn is_empty(&self) -> bool {
        self.build.is_none() && self.deploy.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    pub builder: String,
    #[serde(default)]
    pub options: OptionMap,
    #[serde(default)]
    pub configurations: BTreeMap<ConfigurationKey, OptionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<ConfigurationKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploySpec {
    pub deployer: String,
    #[serde(default)]
    pub options: OptionMap,
    #[serde(default)]
    pub configurations: BTreeMap<ConfigurationKey, OptionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<ConfigurationKey>,
}

impl DeploySpec {
    /// Parsed deployer, `ModelError::UnknownDeployer` for unrecognised ids.
    pub fn deployer_kind(&self) -> Result<Deployer, ModelError> {
        self.deployer
            .parse()
            .map_err(|id| ModelError::UnknownDeployer { id })
    }
}

impl Project {
    pub fn build(&self) -> Option<&BuildSpec> {
        self.architect.build.as_ref()
    }

    pub fn deploy(&self) -> Option<&DeploySpec> {
        self.architect.deploy.as_ref()
    }

    /// Deployer CI workflows are generated for.
    ///
    /// `metadata.deployer`, recorded by a switch, wins over the deploy spec.
    /// Unknown ids are treated as unset.
    pub fn declared_deployer(&self) -> Option<Deployer> {
        self.metadata
            .get(DEPLOYER_METADATA_KEY)
            .and_then(|v| v.as_str())
            .and_then(|id| id.parse().ok())
            .or_else(|| self.deploy().and_then(|d| d.deployer_kind().ok()))
    }
}

impl WorkspaceModel {
    /// Copy map keys into `Project::name` and check the document version.
    pub fn normalize(mut self) -> Result<Self, ModelError> {
        if self.version != WORKSPACE_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.version,
                expected: WORKSPACE_VERSION,
            });
        }
        for (name, project) in self.projects.iter_mut() {
            project.name = name.clone();
        }
        Ok(self)
    }

    pub fn project(&self, name: &str) -> Result<&Project, ModelError> {
        self.projects
            .get(name)
            .ok_or_else(|| ModelError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    pub fn project_mut(&mut self, name: &str) -> Result<&mut Project, ModelError> {
        self.projects
            .get_mut(name)
            .ok_or_else(|| ModelError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    pub fn environment(&self, name: &str) -> Option<&EnvironmentDefaults> {
        self.environments.get(name)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderDefaults> {
        self.infrastructure.get(name)
    }

    /// Workspace name, falling back to `"workspace"` when unset.
    pub fn name(&self) -> &str {
        if self.workspace.name.trim().is_empty() {
            "workspace"
        } else {
            self.workspace.name.as_str()
        }
    }

    /// Deployers currently declared across all projects, sorted.
    pub fn active_deployers(&self) -> BTreeSet<Deployer> {
        self.projects
            .values()
            .filter_map(Project::declared_deployer)
            .collect()
    }

    /// Projects deploying with `deployer`, by name.
    pub fn projects_using(&self, deployer: Deployer) -> Vec<&Project> {
        self.projects
            .values()
            .filter(|p| p.declared_deployer() == Some(deployer))
            .collect()
    }

    /// Default registry from the workspace `build` section.
    pub fn default_registry(&self) -> Option<&str> {
        self.build
            .registry
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}
