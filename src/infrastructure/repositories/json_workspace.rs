//! JSON Workspace Repository
//!
//! Implements the WorkspaceRepository port over the `keel.json` document.

use std::path::{Path, PathBuf};

use crate::domain::entities::WorkspaceModel;
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::ports::workspace_repository::{RepositoryError, WorkspaceRepository};
use crate::error::ModelError;
use crate::infrastructure::fs::LocalFs;

/// Default workspace document name
pub const WORKSPACE_FILE: &str = "keel.json";

/// JSON-backed workspace repository
///
/// Saves are written pretty-printed with a trailing newline, through the
/// file system's atomic write.
pub struct JsonWorkspaceRepository<FS: FileSystem = LocalFs> {
    path: PathBuf,
    fs: FS,
}

impl JsonWorkspaceRepository<LocalFs> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, LocalFs::new())
    }

    /// Repository for `{root}/{file}`
    pub fn in_dir(root: &Path, file: &str) -> Self {
        Self::new(root.join(file))
    }
}

impl<FS: FileSystem> JsonWorkspaceRepository<FS> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Parse a workspace document. Project names are filled from their keys.
    pub fn parse(&self, content: &str) -> Result<WorkspaceModel, ModelError> {
        parse_workspace(&self.path, content)
    }
}

/// Parse and normalize a workspace document read from `file`.
pub fn parse_workspace(file: &Path, content: &str) -> Result<WorkspaceModel, ModelError> {
    let model: WorkspaceModel =
        serde_json::from_str(content).map_err(|e| ModelError::InvalidWorkspace {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;
    model.normalize()
}

impl<FS: FileSystem> WorkspaceRepository for JsonWorkspaceRepository<FS> {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<WorkspaceModel, RepositoryError> {
        let content = self.fs.read(&self.path).map_err(|e| match e {
            FsError::NotFound(_) => RepositoryError::NotFound {
                path: self.path.clone(),
            },
            other => RepositoryError::Io {
                path: self.path.clone(),
                message: other.to_string(),
            },
        })?;
        Ok(self.parse(&content)?)
    }

    fn save(&self, model: &WorkspaceModel) -> Result<(), RepositoryError> {
        let mut content =
            serde_json::to_string_pretty(model).map_err(|e| RepositoryError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        content.push('\n');
        self.fs
            .write(&self.path, &content)
            .map_err(|e| RepositoryError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}
