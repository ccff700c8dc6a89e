//! Platform value object - which OS/arch an artifact is built for

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target platform for artifact builds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Platform {
    /// Build for the host toolchain (no platform flags)
    #[default]
    #[serde(rename = "host")]
    #[value(name = "host")]
    Host,
    #[serde(rename = "linux/amd64")]
    #[value(name = "linux/amd64")]
    LinuxAmd64,
    #[serde(rename = "linux/arm64")]
    #[value(name = "linux/arm64")]
    LinuxArm64,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Host => "host",
            Platform::LinuxAmd64 => "linux/amd64",
            Platform::LinuxArm64 => "linux/arm64",
        }
    }

    /// Build-tool flags selecting this platform.
    pub fn build_flags(&self) -> Vec<String> {
        match self {
            Platform::Host => Vec::new(),
            Platform::LinuxAmd64 => vec![
                "--platforms=@io_bazel_rules_go//go/toolchain:linux_amd64".to_string(),
                "--@io_bazel_rules_go//go/config:pure".to_string(),
            ],
            Platform::LinuxArm64 => vec![
                "--platforms=@io_bazel_rules_go//go/toolchain:linux_arm64".to_string(),
                "--@io_bazel_rules_go//go/config:pure".to_string(),
            ],
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "host" | "native" => Ok(Platform::Host),
            "linux/amd64" | "linux_amd64" | "amd64" => Ok(Platform::LinuxAmd64),
            "linux/arm64" | "linux_arm64" | "arm64" => Ok(Platform::LinuxArm64),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
