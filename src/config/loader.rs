//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::Platform;
use crate::error::{KeelError, KeelResult};

use super::types::KeelConfig;

/// Project configuration file, relative to the workspace root
pub const PROJECT_CONFIG_FILE: &str = "keel.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KeelResult<(KeelConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

/// Parse TOML `content` read from `path`.
pub fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> KeelResult<(KeelConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: KeelConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KeelError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults.
///
/// Unreadable or malformed files are skipped with a warning.
pub fn load_or_default(project_root: Option<&Path>) -> (KeelConfig, Vec<ConfigWarning>) {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => return (with_env_overrides(config), warnings),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "ignoring configuration"),
        }
    }

    (with_env_overrides(KeelConfig::default()), Vec::new())
}

/// `{config_dir}/keel/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs_config_dir().map(|dir| dir.join("keel").join("config.toml"))
}

/// Apply environment variable overrides (KEEL_* prefix)
pub fn with_env_overrides(config: KeelConfig) -> KeelConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup` (an environment accessor).
pub fn apply_overrides(
    mut config: KeelConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> KeelConfig {
    // KEEL_PLATFORM
    if let Some(platform) = lookup("KEEL_PLATFORM") {
        match platform.parse::<Platform>() {
            Ok(platform) => config.compile.platform = platform,
            Err(e) => tracing::warn!(error = %e, "ignoring KEEL_PLATFORM"),
        }
    }

    // KEEL_REGISTRY
    if let Some(registry) = lookup("KEEL_REGISTRY").filter(|r| !r.trim().is_empty()) {
        config.compile.registry = Some(registry);
    }

    // KEEL_WORKSPACE_FILE
    if let Some(file) = lookup("KEEL_WORKSPACE_FILE").filter(|f| !f.trim().is_empty()) {
        config.workspace.file = file;
    }

    // KEEL_JSON
    if let Some(val) = lookup("KEEL_JSON") {
        config.output.json = val.to_lowercase() != "false" && val != "0";
    }

    config
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "compile",
        "platform",
        "registry",
        "charts",
        "default",
        "workspace",
        "file",
        "output",
        "json",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
