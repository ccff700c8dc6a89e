//! Generator Implementations
//!
//! Built-in implementations of the DeployFileGenerator and WorkflowGenerator ports.

mod manifest;
mod workflow;

pub use manifest::ManifestGenerator;
pub use workflow::{CiWorkflowGenerator, WORKFLOW_PATH};
