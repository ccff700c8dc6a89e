use std::path::{Path, PathBuf};

use keel::config::PROJECT_CONFIG_FILE;
use keel::infrastructure::WORKSPACE_FILE;

/// Discover the workspace root from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - the workspace document (`keel.json`, or `KEEL_WORKSPACE_FILE`)
/// - `keel.toml`
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_workspace_root(start: &Path) -> PathBuf {
    let document = std::env::var("KEEL_WORKSPACE_FILE")
        .ok()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| WORKSPACE_FILE.to_string());
    discover_with(start, &document)
}

fn discover_with(start: &Path, document: &str) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(document).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
