//! Switch Use Case
//!
//! Orchestrates a deployer switch:
//! 1. DetectOld - read the current deployer and its folder
//! 2. ConfirmDeletion - ask before the old folder goes away
//! 3. Stage - generate the new files into a staging directory
//! 4. RemoveOld - move the old folder into a `.keel-retired-*` directory
//! 5. Promote - move the staging directory into place
//! 6. UpdateConfig - persist the new deploy spec, then delete the retired folder
//! 7. UpdateWorkflows - regenerate CI workflows
//!
//! Generation happens before anything is moved, so a generator failure leaves
//! the project untouched. The old files are only deleted once the new deployer
//! is recorded. Failures in between never lose files:
//! - Promote: `SwitchError::Inconsistent`, staged and retired files kept
//! - UpdateConfig: `SwitchError::ConfigMismatch`, retired files kept
//!
//! A retired folder that cannot be deleted is reported in
//! `SwitchReport::leftover`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{DeploySpec, Project, WorkspaceModel, DEPLOYER_METADATA_KEY};
use crate::domain::ports::{
    AssumeNo, DeletionConfirmer, DeployFileGenerator, FileSystem, NoopEventSink, SwitchEvent,
    SwitchEventSink, SwitchPhase, WorkflowGenerator, WorkspaceRepository,
};
use crate::domain::services::resolver::{resolve_config_path, DEFAULT_CONFIG_PATH, DEFAULT_REGION};
use crate::domain::value_objects::{
    flatten_options, string_option, Deployer, OptionMap, OptionValue,
};
use crate::error::ModelError;

use super::error::SwitchError;
use super::options::SwitchOptions;
use super::result::{SwitchOutcome, SwitchReport};

/// Prefix of staging directories created in the workspace root
pub const STAGING_PREFIX: &str = ".keel-stage-";

/// Prefix of directories holding a replaced deployment folder until the
/// switch is recorded
pub const RETIRED_PREFIX: &str = ".keel-retired-";

const RETIRED_NAME: &str = "previous";

const CONFIG_PATH_KEY: &str = "configPath";

/// Old deployment state found in DetectOld
struct Detected {
    from: Option<String>,
    old_dir: Option<PathBuf>,
    new_config_path: String,
    new_dir: PathBuf,
}

/// Switch use case - parameterized by its ports
pub struct SwitchUseCase<R, FS>
where
    R: WorkspaceRepository,
    FS: FileSystem,
{
    repo: R,
    fs: FS,
    files: Box<dyn DeployFileGenerator>,
    workflows: Box<dyn WorkflowGenerator>,
    confirmer: Arc<dyn DeletionConfirmer>,
    events: Arc<dyn SwitchEventSink>,
}

impl<R, FS> SwitchUseCase<R, FS>
where
    R: WorkspaceRepository,
    FS: FileSystem,
{
    /// New use case that declines deletion and reports nothing
    pub fn new(
        repo: R,
        fs: FS,
        files: Box<dyn DeployFileGenerator>,
        workflows: Box<dyn WorkflowGenerator>,
    ) -> Self {
        Self {
            repo,
            fs,
            files,
            workflows,
            confirmer: Arc::new(AssumeNo),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn DeletionConfirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn SwitchEventSink>) -> Self {
        self.events = events;
        self
    }

    fn workspace_root(&self) -> PathBuf {
        self.repo
            .path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn start(&self, phase: SwitchPhase) {
        tracing::info!(phase = %phase, "switch phase");
        self.events.on_event(SwitchEvent::PhaseStarted { phase });
    }

    fn skip(&self, phase: SwitchPhase, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(phase = %phase, reason = %reason, "switch phase skipped");
        self.events.on_event(SwitchEvent::PhaseSkipped { phase, reason });
    }

    fn fail(&self, err: SwitchError) -> SwitchError {
        if let Some(phase) = err.failed_phase() {
            tracing::warn!(phase = %phase, error = %err, "switch phase failed");
            self.events.on_event(SwitchEvent::PhaseFailed {
                phase,
                error: err.to_string(),
            });
        }
        err
    }

    /// Run the switch.
    pub fn execute(&self, options: &SwitchOptions) -> Result<SwitchOutcome, SwitchError> {
        let target: Deployer = options
            .deployer
            .parse()
            .map_err(|id| ModelError::UnknownDeployer { id })?;

        // Phase 1: DetectOld
        self.start(SwitchPhase::DetectOld);
        let mut model = self
            .repo
            .load()
            .map_err(|e| self.fail(SwitchError::phase(SwitchPhase::DetectOld, e)))?;
        let project = model.project(&options.project)?.clone();

        if project
            .deploy()
            .and_then(|d| d.deployer_kind().ok())
            .is_some_and(|current| current == target)
        {
            self.skip(
                SwitchPhase::DetectOld,
                format!("already deploying with {}", target),
            );
            return Ok(SwitchOutcome::AlreadyActive {
                project: project.name,
                deployer: target,
            });
        }

        let root = self.workspace_root();
        let detected = self
            .detect(&root, &project, options)
            .map_err(|e| self.fail(e))?;
        self.events.on_event(SwitchEvent::Started {
            project: project.name.clone(),
            from: detected.from.clone(),
            to: target.id().to_string(),
        });

        // Phase 2: ConfirmDeletion
        let old_dir = match &detected.old_dir {
            Some(dir) if self.fs.exists(dir) => {
                self.start(SwitchPhase::ConfirmDeletion);
                if !options.force && !self.confirmer.confirm_deletion(&project.name, dir) {
                    tracing::info!(project = %project.name, "switch cancelled");
                    return Ok(SwitchOutcome::Cancelled {
                        project: project.name,
                    });
                }
                Some(dir.clone())
            }
            _ => {
                self.skip(SwitchPhase::ConfirmDeletion, "no existing deployment folder");
                None
            }
        };

        // Phase 3: Stage
        self.start(SwitchPhase::Stage);
        let spec = new_deploy_spec(&model, &project, target, options, &detected.new_config_path);
        let mut staged_project = project.clone();
        staged_project.architect.deploy = Some(spec.clone());

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&root)
            .map_err(|e| self.fail(SwitchError::phase(SwitchPhase::Stage, e)))?;
        let staged = self
            .files
            .generate(target, &staged_project, &spec.options, staging.path())
            .map_err(|e| self.fail(SwitchError::phase(SwitchPhase::Stage, e)))?;
        if staged.is_empty() {
            return Err(self.fail(SwitchError::phase(
                SwitchPhase::Stage,
                format!("{} generator produced no files", target),
            )));
        }

        // Phase 4: RemoveOld
        let retired = match &old_dir {
            Some(dir) => {
                self.start(SwitchPhase::RemoveOld);
                let retired = self
                    .retire(&root, dir)
                    .map_err(|e| self.fail(e))?;
                self.events
                    .on_event(SwitchEvent::FolderRemoved { path: dir.clone() });
                Some(retired)
            }
            None => {
                self.skip(SwitchPhase::RemoveOld, "nothing to remove");
                None
            }
        };

        // Phase 5: Promote
        self.start(SwitchPhase::Promote);
        let staging_path = staging.keep();
        if let Err(e) = self.fs.rename(&staging_path, &detected.new_dir) {
            return Err(self.fail(SwitchError::Inconsistent {
                project: project.name.clone(),
                staging: staging_path,
                retired,
                message: e.to_string(),
            }));
        }
        let written: Vec<PathBuf> = staged
            .iter()
            .filter_map(|path| path.strip_prefix(&staging_path).ok())
            .map(|relative| detected.new_dir.join(relative))
            .collect();
        for path in &written {
            self.events
                .on_event(SwitchEvent::FileWritten { path: path.clone() });
        }

        // Phase 6: UpdateConfig
        self.start(SwitchPhase::UpdateConfig);
        {
            let entry = model.project_mut(&project.name)?;
            entry.architect.deploy = Some(spec);
            entry.metadata.insert(
                DEPLOYER_METADATA_KEY.to_string(),
                OptionValue::from(target.id()),
            );
        }
        if let Err(e) = self.repo.save(&model) {
            return Err(self.fail(SwitchError::ConfigMismatch {
                project: project.name.clone(),
                config_dir: detected.new_dir.clone(),
                recorded: detected.from.clone(),
                active: target,
                retired,
                message: e.to_string(),
            }));
        }
        let leftover = retired.and_then(|path| self.discard(path));

        // Phase 7: UpdateWorkflows
        self.start(SwitchPhase::UpdateWorkflows);
        let workflows = self
            .workflows
            .regenerate(&model, &root)
            .map_err(|e| self.fail(SwitchError::phase(SwitchPhase::UpdateWorkflows, e)))?;
        for path in &workflows {
            self.events
                .on_event(SwitchEvent::FileWritten { path: path.clone() });
        }

        self.events.on_event(SwitchEvent::Completed {
            project: project.name.clone(),
            deployer: target.id().to_string(),
        });
        tracing::info!(project = %project.name, deployer = %target, "switch complete");

        Ok(SwitchOutcome::Switched(SwitchReport {
            project: project.name,
            from: detected.from,
            to: target,
            config_dir: detected.new_dir,
            removed: old_dir,
            leftover,
            written,
            workflows,
        }))
    }

    /// Move the old folder into a `.keel-retired-*` directory in the
    /// workspace root. A failed rename leaves the folder where it was.
    fn retire(&self, root: &Path, dir: &Path) -> Result<PathBuf, SwitchError> {
        let holder = tempfile::Builder::new()
            .prefix(RETIRED_PREFIX)
            .tempdir_in(root)
            .map_err(|e| SwitchError::phase(SwitchPhase::RemoveOld, e))?;
        let retired = holder.path().join(RETIRED_NAME);
        self.fs
            .rename(dir, &retired)
            .map_err(|e| SwitchError::phase(SwitchPhase::RemoveOld, e))?;
        Ok(holder.keep())
    }

    /// Delete a retired folder. Returns its path when it could not be
    /// removed completely; the switch itself has already succeeded.
    fn discard(&self, retired: PathBuf) -> Option<PathBuf> {
        match self.fs.remove_dir_all(&retired) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    path = %retired.display(),
                    error = %e,
                    "could not delete the previous deployment folder"
                );
                Some(retired)
            }
        }
    }

    fn detect(
        &self,
        root: &Path,
        project: &Project,
        options: &SwitchOptions,
    ) -> Result<Detected, SwitchError> {
        let project_dir = root.join(&project.root);
        let from = project.deploy().map(|d| d.deployer.clone());
        let old_config_path = project.deploy().map(|_| resolve_config_path(project));
        let old_dir = old_config_path.as_ref().map(|p| project_dir.join(p));

        let new_config_path = options
            .config_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| string_option(&options.answers, CONFIG_PATH_KEY))
            .map(str::to_string)
            .or(old_config_path)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let new_dir = project_dir.join(&new_config_path);

        // An unrelated folder at the destination would block Promote after the
        // old folder is already gone.
        if old_dir.as_ref() != Some(&new_dir) && self.fs.exists(&new_dir) {
            return Err(SwitchError::phase(
                SwitchPhase::DetectOld,
                format!("destination {} already exists", new_dir.display()),
            ));
        }

        Ok(Detected {
            from,
            old_dir,
            new_config_path,
            new_dir,
        })
    }
}

/// Deploy spec for the new deployer: flattened answers, the config path and
/// seeded per-environment overlays.
fn new_deploy_spec(
    model: &WorkspaceModel,
    project: &Project,
    target: Deployer,
    options: &SwitchOptions,
    config_path: &str,
) -> DeploySpec {
    let mut deploy_options = flatten_options(&options.answers);
    deploy_options.insert(
        CONFIG_PATH_KEY.to_string(),
        OptionValue::from(config_path),
    );

    DeploySpec {
        deployer: target.id().to_string(),
        configurations: seed_configurations(model, project, target, &deploy_options),
        options: deploy_options,
        default_configuration: project.deploy().and_then(|d| d.default_configuration.clone()),
    }
}

/// Per-environment overlays seeded for a freshly switched project.
///
/// Environments are the workspace's declared environments plus the project's
/// build configuration keys.
pub fn seed_configurations(
    model: &WorkspaceModel,
    project: &Project,
    target: Deployer,
    options: &OptionMap,
) -> std::collections::BTreeMap<String, OptionMap> {
    let mut environments: BTreeSet<String> = model.environments.keys().cloned().collect();
    if let Some(build) = project.build() {
        environments.extend(build.configurations.keys().cloned());
    }

    let seed: Box<dyn Fn(&str) -> (String, OptionValue)> = match target {
        Deployer::Helm => {
            let workspace = model.name().to_string();
            Box::new(move |env| {
                (
                    "namespace".to_string(),
                    OptionValue::from(format!("{}-{}", workspace, env)),
                )
            })
        }
        Deployer::Firebase => {
            let base = string_option(options, "projectId")
                .or_else(|| {
                    model
                        .provider(target.provider())
                        .and_then(|p| p.project_id.as_deref())
                        .filter(|id| !id.trim().is_empty())
                })
                .unwrap_or_else(|| model.name())
                .to_string();
            Box::new(move |env| {
                (
                    "projectId".to_string(),
                    OptionValue::from(format!("{}-{}", base, env)),
                )
            })
        }
        Deployer::CloudRun => {
            let region = string_option(options, "region")
                .or_else(|| {
                    model
                        .provider(target.provider())
                        .and_then(|p| p.region.as_deref())
                        .filter(|r| !r.trim().is_empty())
                })
                .unwrap_or(DEFAULT_REGION)
                .to_string();
            Box::new(move |_env| ("region".to_string(), OptionValue::from(region.as_str())))
        }
    };

    environments
        .into_iter()
        .map(|env| {
            let (key, value) = seed(&env);
            let mut overlay = OptionMap::new();
            overlay.insert(key, value);
            (env, overlay)
        })
        .collect()
}
