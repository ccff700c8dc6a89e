//! Test environment builder for isolated Keel testing.
//!
//! Provides `TestEnv` - an isolated workspace directory and home directory,
//! plus helpers to run the `keel` binary inside them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a Keel CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as one JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!("stdout is not JSON ({}):\n{}", e, self.stdout)
        })
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid NDJSON line ({}): {}", e, line))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory holding the workspace document
    pub workspace_root: TempDir,
    /// Temporary directory for HOME / XDG_CONFIG_HOME
    pub home_dir: TempDir,
    keel_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to the workspace root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace_root.path().join(relative)
    }

    /// Run keel from the workspace root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.workspace_root.path(), args)
    }

    /// Run keel from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    /// Run keel from the workspace root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.workspace_root.path(), args, env_vars)
    }

    fn run_from_with_env(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let home = self.home_dir.path();
        let mut cmd = Command::new(&self.keel_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", home)
            .env("USERPROFILE", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("KEEL_PLATFORM")
            .env_remove("KEEL_REGISTRY")
            .env_remove("KEEL_WORKSPACE_FILE")
            .env_remove("KEEL_JSON")
            .env_remove("KEEL_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute keel");
        output_to_result(output)
    }

    /// Read a workspace file
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Read the workspace document as JSON
    pub fn workspace_document(&self) -> serde_json::Value {
        serde_json::from_str(&self.read("keel.json")).expect("workspace document is JSON")
    }

    /// Write a file under the workspace root
    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.path(relative), content);
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    workspace: Option<String>,
    project_config: Option<String>,
    home_config: Option<String>,
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            workspace: None,
            project_config: None,
            home_config: None,
            files: Vec::new(),
        }
    }

    /// Set the `keel.json` content
    pub fn with_workspace(mut self, json: &str) -> Self {
        self.workspace = Some(json.to_string());
        self
    }

    /// Set `keel.toml` content in the workspace root
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    /// Set user config content (`$XDG_CONFIG_HOME/keel/config.toml`)
    pub fn with_home_config(mut self, toml: &str) -> Self {
        self.home_config = Some(toml.to_string());
        self
    }

    /// Add a file under the workspace root
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            workspace_root: TempDir::new().expect("Failed to create workspace dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            keel_bin: PathBuf::from(env!("CARGO_BIN_EXE_keel")),
        };

        if let Some(json) = &self.workspace {
            env.write("keel.json", json);
        }
        if let Some(toml) = &self.project_config {
            env.write("keel.toml", toml);
        }
        if let Some(toml) = &self.home_config {
            write_file(
                &env.home_dir.path().join(".config/keel/config.toml"),
                toml,
            );
        }
        for (relative, content) in &self.files {
            env.write(relative, content);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
