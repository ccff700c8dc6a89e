//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ChartDefaults, Platform};
use crate::error::KeelResult;
use crate::infrastructure::WORKSPACE_FILE;

use super::loader::{self, ConfigWarning};

/// Compilation defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    #[serde(default)]
    pub platform: Platform,

    /// Registry used when the workspace names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

/// Workspace document location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_file")]
    pub file: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            file: default_workspace_file(),
        }
    }
}

fn default_workspace_file() -> String {
    WORKSPACE_FILE.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// NDJSON events and JSON results instead of human output
    #[serde(default)]
    pub json: bool,
}

/// Main configuration structure (`keel.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeelConfig {
    #[serde(default)]
    pub compile: CompileConfig,

    /// Language → chart reference; `default` replaces the fallback chart
    #[serde(default)]
    pub charts: BTreeMap<String, String>,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl KeelConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KeelResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KeelResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> (Self, Vec<ConfigWarning>) {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (KEEL_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Built-in chart table with the configured entries layered on top
    pub fn chart_defaults(&self) -> ChartDefaults {
        ChartDefaults::default().with_overrides(&self.charts)
    }
}
