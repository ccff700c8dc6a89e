//! Deployer value object - the release style a project deploys with

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Known deployers.
///
/// - `Helm`: chart-based release, compiled into `Release`s
/// - `Firebase`: hosting-CLI release, needs environment-level setup
/// - `CloudRun`: serverless-container release, needs environment-level setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployer {
    Helm,
    Firebase,
    #[serde(rename = "cloudrun")]
    CloudRun,
}

impl Deployer {
    pub const ALL: [Deployer; 3] = [Deployer::Helm, Deployer::Firebase, Deployer::CloudRun];

    pub fn id(&self) -> &'static str {
        match self {
            Deployer::Helm => "helm",
            Deployer::Firebase => "firebase",
            Deployer::CloudRun => "cloudrun",
        }
    }

    /// Infrastructure provider whose defaults apply to this deployer.
    pub fn provider(&self) -> &'static str {
        match self {
            Deployer::Helm => "kubernetes",
            Deployer::Firebase => "firebase",
            Deployer::CloudRun => "gcp",
        }
    }

    /// Whether compiled profiles carry releases for this deployer.
    pub fn is_chart_based(&self) -> bool {
        matches!(self, Deployer::Helm)
    }
}

impl FromStr for Deployer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "helm" => Ok(Deployer::Helm),
            "firebase" => Ok(Deployer::Firebase),
            "cloudrun" | "cloud-run" => Ok(Deployer::CloudRun),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
