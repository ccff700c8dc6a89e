//! Generator ports - deployer file materialisation and CI workflow refresh

use std::path::{Path, PathBuf};

use crate::domain::entities::{Project, WorkspaceModel};
use crate::domain::value_objects::{Deployer, OptionMap};

/// Generation failures
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("failed to render {what}: {message}")]
    Render { what: String, message: String },
}

/// Writes the deployment configuration files for one deployer.
pub trait DeployFileGenerator {
    /// Materialise files for `deployer` under `dest`, returning the written paths.
    fn generate(
        &self,
        deployer: Deployer,
        project: &Project,
        options: &OptionMap,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, GenerateError>;
}

/// Regenerates derived CI workflow files from the active deployers.
pub trait WorkflowGenerator {
    fn regenerate(
        &self,
        workspace: &WorkspaceModel,
        workspace_root: &Path,
    ) -> Result<Vec<PathBuf>, GenerateError>;
}
