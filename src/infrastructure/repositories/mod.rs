//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod json_workspace;

pub use json_workspace::{parse_workspace, JsonWorkspaceRepository, WORKSPACE_FILE};
