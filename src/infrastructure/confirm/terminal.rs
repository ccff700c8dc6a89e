//! Terminal Confirmer
//!
//! Asks on the terminal before an old deployment folder is deleted.

use std::path::Path;
use std::sync::Arc;

use is_terminal::IsTerminal;

use crate::domain::ports::{AssumeNo, AssumeYes, DeletionConfirmer};

/// Yes/no prompt via `dialoguer`. Defaults to "no"; prompt failures decline.
pub struct TerminalConfirmer;

impl DeletionConfirmer for TerminalConfirmer {
    fn confirm_deletion(&self, project: &str, path: &Path) -> bool {
        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(format!(
                "Delete existing deployment folder {} of '{}'?",
                path.display(),
                project
            ))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Pick a confirmer: `--yes` approves, a terminal prompts, anything else declines.
pub fn confirmer_for(yes: bool, json: bool) -> Arc<dyn DeletionConfirmer> {
    if yes {
        Arc::new(AssumeYes)
    } else if !json && std::io::stdin().is_terminal() {
        Arc::new(TerminalConfirmer)
    } else {
        Arc::new(AssumeNo)
    }
}
