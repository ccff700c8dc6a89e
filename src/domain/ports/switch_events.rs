//! Switch Event Port
//!
//! Observable interface for deployer switches: progress display, NDJSON
//! event streams for CI, and test recording.

use std::path::PathBuf;

use serde::Serialize;

/// Phases of a deployer switch, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwitchPhase {
    DetectOld,
    ConfirmDeletion,
    Stage,
    RemoveOld,
    Promote,
    UpdateConfig,
    UpdateWorkflows,
}

impl SwitchPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SwitchPhase::DetectOld => "detect-old",
            SwitchPhase::ConfirmDeletion => "confirm-deletion",
            SwitchPhase::Stage => "stage",
            SwitchPhase::RemoveOld => "remove-old",
            SwitchPhase::Promote => "promote",
            SwitchPhase::UpdateConfig => "update-config",
            SwitchPhase::UpdateWorkflows => "update-workflows",
        }
    }
}

impl std::fmt::Display for SwitchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Event emitted during a deployer switch
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchEvent {
    /// Switch started
    Started {
        project: String,
        from: Option<String>,
        to: String,
    },

    /// A phase began
    PhaseStarted { phase: SwitchPhase },

    /// A phase was skipped (nothing to do)
    PhaseSkipped { phase: SwitchPhase, reason: String },

    /// A file was written during staging or workflow refresh
    FileWritten { path: PathBuf },

    /// The old deployment folder was removed
    FolderRemoved { path: PathBuf },

    /// A phase failed; no later phase runs
    PhaseFailed { phase: SwitchPhase, error: String },

    /// Switch finished
    Completed { project: String, deployer: String },
}

/// Trait for receiving switch events
pub trait SwitchEventSink: Send + Sync {
    fn on_event(&self, event: SwitchEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SwitchEventSink for NoopEventSink {
    fn on_event(&self, _event: SwitchEvent) {}
}
