//! Configuration module for Keel
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KEEL_*)
//! 3. Project config (`keel.toml` next to the workspace document)
//! 4. User config (~/.config/keel/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Charts configured under `[charts]` are layered over the built-in table,
//! they never replace it.

mod loader;
mod types;

pub use loader::{
    apply_overrides, parse_with_warnings, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{CompileConfig, KeelConfig, OutputConfig, WorkspaceConfig};
