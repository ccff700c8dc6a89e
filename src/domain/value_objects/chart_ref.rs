//! Chart reference value object

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a release's chart comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ref", rename_all = "lowercase")]
pub enum ChartRef {
    /// Workspace-relative chart directory
    Local(PathBuf),
    /// Registry or repository reference (`oci://…`, `https://…`)
    Remote(String),
}

impl ChartRef {
    /// Classify a configured chart string.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        if trimmed.contains("://") {
            ChartRef::Remote(trimmed.to_string())
        } else {
            ChartRef::Local(PathBuf::from(trimmed))
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            ChartRef::Local(path) => Some(path),
            ChartRef::Remote(_) => None,
        }
    }
}

impl std::fmt::Display for ChartRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartRef::Local(path) => write!(f, "{}", path.display()),
            ChartRef::Remote(reference) => f.write_str(reference),
        }
    }
}

/// Default chart per project language, used when a project sets no `chartPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDefaults {
    /// Chart for languages without an entry
    pub default: String,
    pub by_language: BTreeMap<String, String>,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        let by_language = [
            ("go", "oci://ghcr.io/keel-charts/go-service"),
            ("node-service", "oci://ghcr.io/keel-charts/node-service"),
            ("angular", "oci://ghcr.io/keel-charts/static-site"),
            ("vue", "oci://ghcr.io/keel-charts/static-site"),
        ]
        .into_iter()
        .map(|(lang, chart)| (lang.to_string(), chart.to_string()))
        .collect();

        Self {
            default: "oci://ghcr.io/keel-charts/service".to_string(),
            by_language,
        }
    }
}

impl ChartDefaults {
    /// Layer configured entries over the built-in table; the `default` key
    /// replaces the fallback chart.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (language, chart) in overrides {
            if language == "default" {
                self.default = chart.clone();
            } else {
                self.by_language.insert(language.clone(), chart.clone());
            }
        }
        self
    }

    pub fn for_language(&self, language: &str) -> ChartRef {
        let reference = self
            .by_language
            .get(language)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.default);
        ChartRef::parse(reference)
    }
}
