//! Switch Result

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::Deployer;

/// What a completed switch did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchReport {
    pub project: String,
    /// Previous deployer id, `None` when the project had no deploy spec
    pub from: Option<String>,
    pub to: Deployer,
    /// Deployment folder now holding the generated files
    pub config_dir: PathBuf,
    /// Old deployment folder, when one was replaced
    pub removed: Option<PathBuf>,
    /// Retired copy of the old folder that could not be deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leftover: Option<PathBuf>,
    /// Generated deployment files (final locations)
    pub written: Vec<PathBuf>,
    /// Regenerated CI workflow files
    pub workflows: Vec<PathBuf>,
}

/// Outcome of a switch request. Declining confirmation is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SwitchOutcome {
    /// Project already deploys with the requested deployer; nothing touched
    AlreadyActive { project: String, deployer: Deployer },
    /// Deletion of the old folder was declined; nothing touched
    Cancelled { project: String },
    Switched(SwitchReport),
}
