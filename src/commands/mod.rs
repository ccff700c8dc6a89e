//! Command handlers
//!
//! Each handler builds the use case for its command from the shared
//! [`Context`] and renders the result as text or JSON.

use std::path::{Path, PathBuf};

use anyhow::Result;

use keel::config::ConfigWarning;
use keel::infrastructure::JsonWorkspaceRepository;
use keel::KeelConfig;

pub mod compile;
pub mod project_root;
pub mod resolve;
pub mod switch;

/// Resolved workspace root and tool configuration
pub struct Context {
    pub root: PathBuf,
    pub config: KeelConfig,
    pub json: bool,
}

impl Context {
    /// Locate the workspace root and load `keel.toml` (or defaults).
    pub fn discover(workspace: Option<&Path>, json: bool) -> Result<Self> {
        let root = match workspace {
            Some(dir) => dir.to_path_buf(),
            None => project_root::discover_workspace_root(&std::env::current_dir()?),
        };

        let (config, warnings) = KeelConfig::load_or_default(Some(&root));
        print_config_warnings(&warnings);

        let json = json || config.output.json;
        tracing::debug!(root = %root.display(), json, "workspace context");
        Ok(Self { root, config, json })
    }

    pub fn repository(&self) -> JsonWorkspaceRepository {
        JsonWorkspaceRepository::in_dir(&self.root, &self.config.workspace.file)
    }
}

/// Unknown config keys go to stderr in every output mode.
fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w.line {
            Some(line) => eprintln!(
                "⚠ Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            ),
            None => eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display()),
        }
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
