//! CI Workflow Generator
//!
//! Regenerates `.github/workflows/keel-deploy.yml` with one job per deployer
//! declared across the workspace (`metadata.deployer`, else the deploy spec).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::WorkspaceModel;
use crate::domain::ports::{FileSystem, GenerateError, WorkflowGenerator};
use crate::domain::value_objects::Deployer;
use crate::infrastructure::fs::LocalFs;

/// Workflow file, relative to the workspace root
pub const WORKFLOW_PATH: &str = ".github/workflows/keel-deploy.yml";

const HEADER: &str = "# Generated by keel. Regenerated on every `keel switch`.\n";

/// Built-in GitHub Actions workflow generator
pub struct CiWorkflowGenerator<FS: FileSystem = LocalFs> {
    fs: FS,
}

impl CiWorkflowGenerator<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for CiWorkflowGenerator<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> CiWorkflowGenerator<FS> {
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }
}

impl<FS: FileSystem> WorkflowGenerator for CiWorkflowGenerator<FS> {
    fn regenerate(
        &self,
        workspace: &WorkspaceModel,
        workspace_root: &Path,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let deployers = workspace.active_deployers();
        if deployers.is_empty() {
            tracing::debug!("no active deployers; workflow left untouched");
            return Ok(Vec::new());
        }

        let jobs = deployers
            .into_iter()
            .map(|deployer| {
                let projects: Vec<&str> = workspace
                    .projects_using(deployer)
                    .into_iter()
                    .map(|p| p.name.as_str())
                    .collect();
                (format!("deploy-{}", deployer.id()), job(deployer, &projects))
            })
            .collect();

        let workflow = Workflow {
            name: "keel deploy",
            on: Triggers {
                push: Push {
                    branches: vec!["main"],
                },
                workflow_dispatch: BTreeMap::new(),
            },
            jobs,
        };

        let path = workspace_root.join(WORKFLOW_PATH);
        let body = serde_yaml_ng::to_string(&workflow).map_err(|e| GenerateError::Render {
            what: WORKFLOW_PATH.to_string(),
            message: e.to_string(),
        })?;
        self.fs
            .write(&path, &format!("{}{}", HEADER, body))
            .map_err(|e| GenerateError::Write {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(vec![path])
    }
}

fn job(deployer: Deployer, projects: &[&str]) -> Job {
    let selection: String = projects
        .iter()
        .map(|p| format!(" --project {}", p))
        .collect();

    let setup = match deployer {
        Deployer::Helm => Step::uses("Set up helm", "azure/setup-helm@v4"),
        Deployer::Firebase => Step::uses(
            "Set up firebase",
            "FirebaseExtended/action-hosting-deploy@v0",
        ),
        Deployer::CloudRun => Step::uses(
            "Authenticate to Google Cloud",
            "google-github-actions/auth@v2",
        ),
    };

    Job {
        name: format!("Deploy {} projects", deployer),
        runs_on: "ubuntu-latest",
        steps: vec![
            Step::uses("Checkout", "actions/checkout@v4"),
            setup,
            Step::run(
                "Compile profiles",
                format!("keel compile{} > profiles.json", selection),
            ),
        ],
    }
}

#[derive(Serialize)]
struct Workflow {
    name: &'static str,
    on: Triggers,
    jobs: BTreeMap<String, Job>,
}

#[derive(Serialize)]
struct Triggers {
    push: Push,
    workflow_dispatch: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Push {
    branches: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Job {
    name: String,
    runs_on: &'static str,
    steps: Vec<Step>,
}

#[derive(Serialize)]
struct Step {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<String>,
}

impl Step {
    fn uses(name: &str, action: &str) -> Self {
        Self {
            name: name.to_string(),
            uses: Some(action.to_string()),
            run: None,
        }
    }

    fn run(name: &str, command: String) -> Self {
        Self {
            name: name.to_string(),
            uses: None,
            run: Some(command),
        }
    }
}
