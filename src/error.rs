//! Error types for Keel
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::switch::SwitchError;
use crate::domain::ports::RepositoryError;

/// Result type alias for Keel operations
pub type KeelResult<T> = Result<T, KeelError>;

/// Main error type for Keel operations
#[derive(Error, Debug)]
pub enum KeelError {
    /// Workspace model is malformed or references something that doesn't exist
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Workspace document could not be loaded or saved
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Deployer switch failed in one of its phases
    #[error(transparent)]
    Switch(#[from] SwitchError),

    /// Invalid tool configuration (keel.toml)
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the workspace model itself. Always fatal, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("project '{name}' not found in workspace")]
    ProjectNotFound { name: String },

    #[error("unknown deployer '{id}' (expected one of: helm, firebase, cloudrun)")]
    UnknownDeployer { id: String },

    #[error("invalid workspace document {file}: {message}")]
    InvalidWorkspace { file: PathBuf, message: String },

    #[error("unsupported workspace version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
