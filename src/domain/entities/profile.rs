//! Profile entities - the compiled output handed to build/deploy drivers

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{ChartRef, Deployer};

/// A resolved container-image build descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub project: String,
    /// `registry/project`, or bare `project` when no registry is configured
    pub image_name: String,
    pub build_target: String,
    pub build_args: Vec<String>,
}

/// A resolved chart-based release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub name: String,
    pub project: String,
    pub chart: ChartRef,
    pub namespace: String,
    pub value_files: Vec<PathBuf>,
    pub set_values: BTreeMap<String, String>,
    pub has_secrets: bool,
}

/// Marker for deploy styles that need environment-level setup by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSetup {
    pub project: String,
    pub deployer: Deployer,
}

/// Deployment section of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub releases: Vec<Release>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provider_setup: Vec<ProviderSetup>,
}

impl Deployment {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty() && self.provider_setup.is_empty()
    }
}

/// Compiled output for one configuration key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub artifacts: Vec<Artifact>,
    pub deployment: Deployment,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifacts: Vec::new(),
            deployment: Deployment::default(),
        }
    }

    pub fn release(&self, name: &str) -> Option<&Release> {
        self.deployment.releases.iter().find(|r| r.name == name)
    }

    pub fn artifact(&self, project: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.project == project)
    }
}
