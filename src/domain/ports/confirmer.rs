//! Deletion confirmation port
//!
//! The switcher asks before removing an existing deployment folder.

use std::path::Path;

/// Asks whether an existing deployment folder may be deleted.
pub trait DeletionConfirmer {
    fn confirm_deletion(&self, project: &str, path: &Path) -> bool;
}

/// Always approves (`--yes` / force)
pub struct AssumeYes;

impl DeletionConfirmer for AssumeYes {
    fn confirm_deletion(&self, _project: &str, _path: &Path) -> bool {
        true
    }
}

/// Always declines (non-interactive runs without `--yes`)
pub struct AssumeNo;

impl DeletionConfirmer for AssumeNo {
    fn confirm_deletion(&self, _project: &str, _path: &Path) -> bool {
        false
    }
}
