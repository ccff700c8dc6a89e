//! Resolve command handler
//!
//! Shows every resolved setting of one project in one environment.

use anyhow::Result;

use keel::domain::ports::WorkspaceRepository;
use keel::domain::services::{resolve_settings, Overrides, ResolvedSettings};

use super::Context;

/// Execute the resolve command
pub fn cmd_resolve(
    ctx: &Context,
    project: &str,
    environment: &str,
    registry: Option<&str>,
) -> Result<()> {
    let workspace = ctx.repository().load()?;
    let project = workspace.project(project)?;

    let overrides = Overrides {
        registry,
        ..Default::default()
    };
    let settings = resolve_settings(&workspace, project, environment, overrides);

    if ctx.json {
        println!("{}", serde_json::to_string(&settings)?);
    } else {
        print!("{}", render_table(&settings));
    }
    Ok(())
}

fn render_table(settings: &ResolvedSettings) -> String {
    let registry = if settings.registry.is_empty() {
        "(none)"
    } else {
        settings.registry.as_str()
    };
    let rows = [
        ("project", settings.project.clone()),
        ("environment", settings.environment.clone()),
        ("registry", registry.to_string()),
        ("port", settings.port.to_string()),
        ("region", settings.region.clone()),
        ("cluster", settings.cluster.clone()),
        ("namespace", settings.namespace.clone()),
        ("targets", settings.deploy_targets.join(", ")),
        ("config path", settings.config_path.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<12} {}\n", label, value))
        .collect()
}
