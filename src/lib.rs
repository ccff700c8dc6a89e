//! Keel - deployment configuration compiler
//!
//! Keel reads a multi-project workspace document (`keel.json`) and compiles
//! it into deployment profiles: the build artifacts, chart releases and
//! provider setup each environment needs. It can also move a project from
//! one deployer to another, regenerating its deployment files and CI
//! workflow.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::KeelConfig;
pub use domain::entities::{Profile, Project, WorkspaceModel};
pub use domain::value_objects::{Deployer, OptionMap, OptionValue, Platform};
pub use error::{KeelError, KeelResult, ModelError};
