//! Switch Errors

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::SwitchPhase;
use crate::domain::value_objects::Deployer;
use crate::error::ModelError;

/// Deployer switch failure. Phases halt in place; nothing is rolled back.
#[derive(Error, Debug)]
pub enum SwitchError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("switch failed during {phase}: {message}")]
    Phase { phase: SwitchPhase, message: String },

    /// The old folder was moved away and the staged files never reached their destination
    #[error(
        "project '{project}' left without deployment files: {message}; staged files kept at {}{}",
        .staging.display(),
        kept_previous(.retired)
    )]
    Inconsistent {
        project: String,
        staging: PathBuf,
        retired: Option<PathBuf>,
        message: String,
    },

    /// New files are in place but the workspace still records the old deployer
    #[error(
        "project '{project}' has {active} files in {} but the workspace still records {}: {message}{}",
        .config_dir.display(),
        .recorded.as_deref().unwrap_or("no deployer"),
        kept_previous(.retired)
    )]
    ConfigMismatch {
        project: String,
        config_dir: PathBuf,
        /// Deployer id the workspace document still holds
        recorded: Option<String>,
        active: Deployer,
        retired: Option<PathBuf>,
        message: String,
    },
}

fn kept_previous(retired: &Option<PathBuf>) -> String {
    match retired {
        Some(path) => format!("; previous files kept at {}", path.display()),
        None => String::new(),
    }
}

impl SwitchError {
    pub(crate) fn phase(phase: SwitchPhase, err: impl std::fmt::Display) -> Self {
        SwitchError::Phase {
            phase,
            message: err.to_string(),
        }
    }

    /// Phase the failure happened in, when it happened in one
    pub fn failed_phase(&self) -> Option<SwitchPhase> {
        match self {
            SwitchError::Model(_) => None,
            SwitchError::Phase { phase, .. } => Some(*phase),
            SwitchError::Inconsistent { .. } => Some(SwitchPhase::Promote),
            SwitchError::ConfigMismatch { .. } => Some(SwitchPhase::UpdateConfig),
        }
    }
}
