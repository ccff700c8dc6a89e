//! Release compiler
//!
//! Turns a project's deploy spec into chart-based releases. Hosting-CLI and
//! serverless-container deployers only contribute a provider-setup marker;
//! their environment-level setup is handled by the driver.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::{Project, ProviderSetup, Release, WorkspaceModel};
use crate::domain::ports::{FileSystem, ReleasePlan, ReleaseProducer, ReleaseRequest};
use crate::domain::services::producer_registry::ProducerRegistry;
use crate::domain::services::resolver::resolve_namespace;
use crate::domain::value_objects::{
    merge_options, string_option, ChartDefaults, ChartRef, Deployer, OptionMap, OptionValue,
};

pub const INSTANCES_KEY: &str = "instances";
pub const CHART_PATH_KEY: &str = "chartPath";

/// Chart-based releases (helm)
#[derive(Debug, Clone, Default)]
pub struct ChartReleaseProducer {
    charts: ChartDefaults,
}

impl ChartReleaseProducer {
    pub fn new(charts: ChartDefaults) -> Self {
        Self { charts }
    }

    fn release(&self, request: &ReleaseRequest<'_>, name: String, options: &OptionMap) -> Release {
        let project = request.project;
        let namespace = resolve_namespace(
            request.workspace,
            request.key,
            Deployer::Helm.provider(),
            string_option(options, "namespace"),
        );

        let local_override = string_option(options, CHART_PATH_KEY)
            .map(|path| Path::new(&project.root).join(path));
        let chart = match &local_override {
            Some(path) => ChartRef::Local(path.clone()),
            None => self.charts.for_language(&project.language),
        };

        let mut value_files = Vec::new();
        let mut has_secrets = false;
        if let Some(chart_path) = chart.local_path() {
            if local_override.is_some() {
                value_files.push(chart_path.join("values.yaml"));
            }
            let env_dir = env_values_dir(chart_path, request.key);
            // Missing env values surface from the chart tool, not here.
            value_files.push(env_dir.join("values.yaml"));

            let secrets = env_dir.join("secrets.yaml");
            if request.fs.exists(&request.workspace_root.join(&secrets)) {
                value_files.push(secrets);
                has_secrets = true;
            }
        }

        Release {
            set_values: set_values(&name, options),
            name,
            project: project.name.clone(),
            chart,
            namespace,
            value_files,
            has_secrets,
        }
    }
}

impl ReleaseProducer for ChartReleaseProducer {
    fn plan(&self, request: &ReleaseRequest<'_>) -> ReleasePlan {
        let project = &request.project.name;

        let releases = match fan_out(request.options) {
            Some(instances) => instances
                .into_iter()
                .map(|(instance, overrides)| {
                    let options = merge_options(request.options, Some(&overrides));
                    self.release(request, format!("{}-{}", project, instance), &options)
                })
                .collect(),
            None => vec![self.release(request, project.clone(), request.options)],
        };

        ReleasePlan::Releases(releases)
    }
}

/// Deployers that need environment-level setup outside this compiler
#[derive(Debug, Clone, Copy)]
pub struct ProviderSetupProducer {
    deployer: Deployer,
}

impl ProviderSetupProducer {
    pub fn new(deployer: Deployer) -> Self {
        Self { deployer }
    }
}

impl ReleaseProducer for ProviderSetupProducer {
    fn plan(&self, request: &ReleaseRequest<'_>) -> ReleasePlan {
        ReleasePlan::ProviderSetup(ProviderSetup {
            project: request.project.name.clone(),
            deployer: self.deployer,
        })
    }
}

/// `{chart}/envs/{key}`
pub fn env_values_dir(chart_path: &Path, key: &str) -> PathBuf {
    chart_path.join("envs").join(key)
}

/// Instance fan-out from the `instances` option.
///
/// `None` when the option is absent or not a list. Elements are either
/// scalars (the instance name) or maps with a `name` entry whose remaining
/// entries override the project options for that instance only. Elements
/// without a usable name are skipped.
fn fan_out(options: &OptionMap) -> Option<Vec<(String, OptionMap)>> {
    let items = options.get(INSTANCES_KEY)?.as_list()?;
    let instances = items
        .iter()
        .filter_map(|item| match item {
            OptionValue::Map(map) => {
                let name = map.get("name").and_then(OptionValue::to_scalar_string)?;
                let mut overrides = map.clone();
                overrides.remove("name");
                Some((name, overrides))
            }
            other => other.to_scalar_string().map(|name| (name, OptionMap::new())),
        })
        .filter(|(name, _)| !name.trim().is_empty())
        .collect();
    Some(instances)
}

/// Inline value overrides. The image is injected later by the driver.
fn set_values(release_name: &str, options: &OptionMap) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    values.insert("nameOverride".to_string(), release_name.to_string());
    values.insert("fullnameOverride".to_string(), release_name.to_string());
    if let Some(port) = options.get("port").and_then(OptionValue::to_scalar_string) {
        values.insert("service.port".to_string(), port);
    }
    if let Some(path) = string_option(options, "healthCheckPath") {
        values.insert("healthCheck.path".to_string(), path.to_string());
    }
    values
}

/// Compile the deployment contribution of `project` under configuration `key`.
///
/// Returns `None` when the project has no deploy spec or its deployer has no
/// registered producer.
pub fn compile_releases(
    producers: &ProducerRegistry,
    workspace: &WorkspaceModel,
    project: &Project,
    key: &str,
    workspace_root: &Path,
    fs: &dyn FileSystem,
) -> Option<ReleasePlan> {
    let spec = project.deploy()?;

    let Some(producer) = producers.release_producer(&spec.deployer) else {
        tracing::warn!(
            project = %project.name,
            deployer = %spec.deployer,
            "no release producer registered for deployer; skipping"
        );
        return None;
    };

    let options = merge_options(&spec.options, spec.configurations.get(key));
    let request = ReleaseRequest {
        workspace,
        project,
        key,
        options: &options,
        workspace_root,
        fs,
    };
    Some(producer.plan(&request))
}
