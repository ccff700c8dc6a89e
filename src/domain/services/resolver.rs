//! Value resolver
//!
//! Resolves a single setting from a fixed precedence chain over the workspace
//! model. Every chain ends in a hard default, so resolution never fails.
//! Empty strings are treated as unset at every level.

use serde::Serialize;

use crate::domain::entities::{Project, WorkspaceModel};
use crate::domain::value_objects::{merge_options, string_option, OptionMap, OptionValue};

/// Environment whose project-local overrides win for ports
pub const LOCAL_ENVIRONMENT: &str = "local";

pub const DEFAULT_REGION: &str = "us-central1";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_CONFIG_PATH: &str = "deploy";
pub const DEFAULT_DEPLOY_TARGET: &str = "helm";
pub const FALLBACK_PORT: u16 = 8080;

/// Provider whose defaults supply the cluster name
pub const CLUSTER_PROVIDER: &str = "kubernetes";

/// Explicit overrides supplied by the caller (CLI flags, merged options)
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub registry: Option<&'a str>,
    pub region: Option<&'a str>,
    pub cluster: Option<&'a str>,
    pub namespace: Option<&'a str>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_owned(value: Option<&String>) -> Option<&str> {
    non_empty(value.map(String::as_str))
}

/// explicit → build options `registry` → environment registry → default registry → `""`
pub fn resolve_registry(
    workspace: &WorkspaceModel,
    environment: &str,
    explicit: Option<&str>,
    build_options: &OptionMap,
    default_registry: Option<&str>,
) -> String {
    non_empty(explicit)
        .or_else(|| string_option(build_options, "registry"))
        .or_else(|| {
            workspace
                .environment(environment)
                .and_then(|e| non_empty_owned(e.registry.as_ref()))
        })
        .or_else(|| non_empty(default_registry))
        .unwrap_or_default()
        .to_string()
}

/// local override (only in the `local` environment) → deploy `{target}.port` → language default
pub fn resolve_port(project: &Project, environment: &str, target: &str) -> u16 {
    let target_port = |options: Option<&OptionMap>| {
        options
            .and_then(|o| o.get(target))
            .and_then(OptionValue::as_map)
            .and_then(|t| t.get("port"))
            .and_then(OptionValue::as_port)
    };

    if environment == LOCAL_ENVIRONMENT {
        if let Some(port) = project
            .local
            .get(target)
            .and_then(|o| o.get("port"))
            .and_then(OptionValue::as_port)
        {
            return port;
        }
    }

    target_port(project.deploy().map(|d| &d.options))
        .unwrap_or_else(|| default_port(&project.language))
}

/// Conventional dev-server/service port for a language tag
pub fn default_port(language: &str) -> u16 {
    match language {
        "go" => 8080,
        "node-service" => 3000,
        "angular" => 4200,
        "vue" => 5173,
        _ => FALLBACK_PORT,
    }
}

/// explicit → environment region → `infrastructure[provider].region` → `us-central1`
pub fn resolve_region(
    workspace: &WorkspaceModel,
    environment: &str,
    provider: &str,
    explicit: Option<&str>,
) -> String {
    non_empty(explicit)
        .or_else(|| {
            workspace
                .environment(environment)
                .and_then(|e| non_empty_owned(e.region.as_ref()))
        })
        .or_else(|| {
            workspace
                .provider(provider)
                .and_then(|p| non_empty_owned(p.region.as_ref()))
        })
        .unwrap_or(DEFAULT_REGION)
        .to_string()
}

/// explicit → environment cluster → `infrastructure.kubernetes.cluster` → `""`
pub fn resolve_cluster(
    workspace: &WorkspaceModel,
    environment: &str,
    explicit: Option<&str>,
) -> String {
    non_empty(explicit)
        .or_else(|| {
            workspace
                .environment(environment)
                .and_then(|e| non_empty_owned(e.cluster.as_ref()))
        })
        .or_else(|| {
            workspace
                .provider(CLUSTER_PROVIDER)
                .and_then(|p| non_empty_owned(p.cluster.as_ref()))
        })
        .unwrap_or_default()
        .to_string()
}

/// explicit → environment namespace → `infrastructure[provider].namespace` → `default`
pub fn resolve_namespace(
    workspace: &WorkspaceModel,
    environment: &str,
    provider: &str,
    explicit: Option<&str>,
) -> String {
    non_empty(explicit)
        .or_else(|| {
            workspace
                .environment(environment)
                .and_then(|e| non_empty_owned(e.namespace.as_ref()))
        })
        .or_else(|| {
            workspace
                .provider(provider)
                .and_then(|p| non_empty_owned(p.namespace.as_ref()))
        })
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string()
}

/// `deploy.options.targets` when non-empty, otherwise `["helm"]`
pub fn resolve_deploy_targets(project: &Project) -> Vec<String> {
    let targets: Vec<String> = project
        .deploy()
        .and_then(|d| d.options.get("targets"))
        .and_then(OptionValue::as_list)
        .map(|items| {
            items
                .iter()
                .filter_map(OptionValue::as_non_empty_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if targets.is_empty() {
        vec![DEFAULT_DEPLOY_TARGET.to_string()]
    } else {
        targets
    }
}

/// `deploy.options.configPath` when non-empty, otherwise `deploy`
pub fn resolve_config_path(project: &Project) -> String {
    project
        .deploy()
        .and_then(|d| string_option(&d.options, "configPath"))
        .unwrap_or(DEFAULT_CONFIG_PATH)
        .to_string()
}

/// Every resolvable setting of one project in one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub project: String,
    pub environment: String,
    pub registry: String,
    pub port: u16,
    pub region: String,
    pub cluster: String,
    pub namespace: String,
    pub deploy_targets: Vec<String>,
    pub config_path: String,
}

/// Resolve every field for inspection (`keel resolve`).
///
/// Port is resolved for the first deploy target; region and namespace use
/// the provider of the project's deployer (`kubernetes` when unknown).
pub fn resolve_settings(
    workspace: &WorkspaceModel,
    project: &Project,
    environment: &str,
    overrides: Overrides<'_>,
) -> ResolvedSettings {
    let provider = project
        .deploy()
        .and_then(|d| d.deployer_kind().ok())
        .map(|d| d.provider())
        .unwrap_or(CLUSTER_PROVIDER);
    let build_options = project
        .build()
        .map(|b| merge_options(&b.options, b.configurations.get(environment)))
        .unwrap_or_default();
    let deploy_targets = resolve_deploy_targets(project);
    let target = deploy_targets
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_DEPLOY_TARGET);
    let port = resolve_port(project, environment, target);

    ResolvedSettings {
        project: project.name.clone(),
        environment: environment.to_string(),
        registry: resolve_registry(
            workspace,
            environment,
            overrides.registry,
            &build_options,
            workspace.default_registry(),
        ),
        port,
        region: resolve_region(workspace, environment, provider, overrides.region),
        cluster: resolve_cluster(workspace, environment, overrides.cluster),
        namespace: resolve_namespace(workspace, environment, provider, overrides.namespace),
        deploy_targets,
        config_path: resolve_config_path(project),
    }
}
