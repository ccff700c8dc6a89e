//! WorkspaceRepository port - persistence of the workspace document

use std::path::{Path, PathBuf};

use crate::domain::entities::WorkspaceModel;
use crate::error::ModelError;

/// Workspace persistence errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("workspace document not found: {path}")]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to access {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Loads and atomically saves the workspace model.
pub trait WorkspaceRepository {
    /// Path of the workspace document
    fn path(&self) -> &Path;

    fn load(&self) -> Result<WorkspaceModel, RepositoryError>;

    /// Persist the model; either the old or the new document is on disk afterwards
    fn save(&self, model: &WorkspaceModel) -> Result<(), RepositoryError>;
}
