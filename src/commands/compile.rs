//! Compile command handler
//!
//! Prints the compiled profiles as pretty JSON on stdout.

use anyhow::{Context as _, Result};

use keel::application::CompileUseCase;
use keel::domain::services::{CompileSettings, ProducerRegistry};
use keel::infrastructure::LocalFs;
use keel::Platform;

use super::Context;

/// Execute the compile command
pub fn cmd_compile(
    ctx: &Context,
    projects: &[String],
    platform: Option<Platform>,
    registry: Option<String>,
) -> Result<()> {
    let settings = CompileSettings::new(&ctx.root)
        .with_platform(platform.unwrap_or(ctx.config.compile.platform))
        .with_registry_override(registry)
        .with_default_registry(ctx.config.compile.registry.clone());

    let producers = ProducerRegistry::builtin(ctx.config.chart_defaults());
    tracing::debug!(?producers, "registered producers");
    let use_case = CompileUseCase::new(ctx.repository(), LocalFs::new(), producers);
    let profiles = use_case.execute(&settings, projects)?;

    let out = serde_json::to_string_pretty(&profiles).context("failed to render profiles")?;
    println!("{}", out);

    if !ctx.json {
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        eprintln!("Compiled {} profile(s): {}", profiles.len(), names.join(", "));
    }
    Ok(())
}
