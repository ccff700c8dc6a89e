//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirmer;
pub mod file_system;
pub mod generators;
pub mod producer;
pub mod switch_events;
pub mod workspace_repository;

pub use confirmer::{AssumeNo, AssumeYes, DeletionConfirmer};
pub use file_system::{FileSystem, FsError, FsResult};
pub use generators::{DeployFileGenerator, GenerateError, WorkflowGenerator};
pub use producer::{ArtifactProducer, ReleasePlan, ReleaseProducer, ReleaseRequest};
pub use switch_events::{NoopEventSink, SwitchEvent, SwitchEventSink, SwitchPhase};
pub use workspace_repository::{RepositoryError, WorkspaceRepository};
