use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keel::Platform;

/// Keel - deployment configuration compiler
#[derive(Parser, Debug)]
#[command(name = "keel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace root (defaults to the nearest directory holding the workspace document)
    #[arg(short = 'C', long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile deployment profiles as JSON
    Compile {
        /// Projects to compile (repeatable; all projects when omitted)
        #[arg(short, long = "project")]
        projects: Vec<String>,

        /// Target platform for image artifacts
        #[arg(long, value_enum)]
        platform: Option<Platform>,

        /// Registry overriding every other registry source
        #[arg(long)]
        registry: Option<String>,
    },

    /// Show the resolved settings of a project in one environment
    Resolve {
        /// Project name
        project: String,

        /// Environment (configuration key)
        #[arg(short, long = "env", default_value = "local")]
        environment: String,

        /// Registry overriding every other registry source
        #[arg(long)]
        registry: Option<String>,
    },

    /// Move a project to another deployer
    Switch {
        /// Project name
        project: String,

        /// Target deployer (helm, firebase, cloudrun)
        deployer: String,

        /// Workspace-relative folder for the new deployment files
        #[arg(long)]
        config_path: Option<String>,

        /// Deployer answer (repeatable, KEY=VALUE)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        answers: Vec<String>,

        /// Delete the old deployment folder without asking
        #[arg(short, long)]
        yes: bool,
    },
}
