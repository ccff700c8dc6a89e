//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic writes
//! - `repositories/` - JSON workspace repository
//! - `generators/` - Deployment file and CI workflow generators
//! - `events/` - Switch event sinks
//! - `confirm/` - Terminal deletion confirmer

pub mod confirm;
pub mod events;
pub mod fs;
pub mod generators;
pub mod repositories;

// Re-export for convenience
pub use confirm::{confirmer_for, TerminalConfirmer};
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use generators::{CiWorkflowGenerator, ManifestGenerator, WORKFLOW_PATH};
pub use repositories::{JsonWorkspaceRepository, WORKSPACE_FILE};
