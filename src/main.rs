//! Keel CLI - deployment configuration compiler
//!
//! Usage: keel <COMMAND>
//!
//! Commands:
//!   compile  Compile deployment profiles as JSON
//!   resolve  Show the resolved settings of a project
//!   switch   Move a project to another deployer

use std::str::FromStr;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Context::discover(cli.workspace.as_deref(), cli.json)?;

    match cli.command {
        Commands::Compile {
            projects,
            platform,
            registry,
        } => commands::compile::cmd_compile(&ctx, &projects, platform, registry),
        Commands::Resolve {
            project,
            environment,
            registry,
        } => commands::resolve::cmd_resolve(&ctx, &project, &environment, registry.as_deref()),
        Commands::Switch {
            project,
            deployer,
            config_path,
            answers,
            yes,
        } => commands::switch::cmd_switch(
            &ctx,
            commands::switch::SwitchArgs {
                project,
                deployer,
                config_path,
                answers,
                yes,
            },
        ),
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("KEEL_LOG")
        .ok()
        .and_then(|env| tracing_subscriber::EnvFilter::from_str(&env).ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
