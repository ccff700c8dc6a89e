//! Switch command handler
//!
//! Moves a project to another deployer while holding an exclusive lock on
//! `{workspace}/.keel.lock`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _, Result};
use fs2::FileExt;

use keel::application::{SwitchOptions, SwitchOutcome, SwitchUseCase};
use keel::infrastructure::{
    confirmer_for, CiWorkflowGenerator, JsonEventSink, LocalFs, ManifestGenerator,
};
use keel::{OptionMap, OptionValue};

use super::Context;

/// Advisory lock serialising switches within one workspace
pub const LOCK_FILE: &str = ".keel.lock";

/// Raw `keel switch` arguments
#[derive(Debug)]
pub struct SwitchArgs {
    pub project: String,
    pub deployer: String,
    pub config_path: Option<String>,
    pub answers: Vec<String>,
    pub yes: bool,
}

/// Execute the switch command
pub fn cmd_switch(ctx: &Context, args: SwitchArgs) -> Result<()> {
    let answers = parse_answers(&args.answers)?;
    let mut options = SwitchOptions::new(&args.project, &args.deployer).with_answers(answers);
    if let Some(path) = &args.config_path {
        options = options.with_config_path(path);
    }

    let mut use_case = SwitchUseCase::new(
        ctx.repository(),
        LocalFs::new(),
        Box::new(ManifestGenerator::new()),
        Box::new(CiWorkflowGenerator::new()),
    )
    .with_confirmer(confirmer_for(args.yes, ctx.json));
    if ctx.json {
        use_case = use_case.with_event_sink(Arc::new(JsonEventSink::stdout()));
    }

    let lock = acquire_lock(&ctx.root)?;
    let result = use_case.execute(&options);
    let _ = lock.unlock();
    let outcome = result?;

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({ "event": "result", "command": "switch", "outcome": outcome })
        );
    } else {
        print!("{}", render_outcome(&outcome, &ctx.root));
    }
    Ok(())
}

fn acquire_lock(root: &Path) -> Result<fs::File> {
    let lock_path = root.join(LOCK_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open {}", lock_path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;
    Ok(file)
}

/// `KEY=VALUE` pairs; values that parse as JSON keep their type.
fn parse_answers(raw: &[String]) -> Result<OptionMap> {
    let mut answers = OptionMap::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid --set '{}': expected KEY=VALUE", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid --set '{}': empty key", pair);
        }
        let value = serde_json::from_str::<OptionValue>(value)
            .unwrap_or_else(|_| OptionValue::String(value.to_string()));
        answers.insert(key.to_string(), value);
    }
    Ok(answers)
}

fn render_outcome(outcome: &SwitchOutcome, root: &Path) -> String {
    let relative = |path: &Path| {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    };

    match outcome {
        SwitchOutcome::AlreadyActive { project, deployer } => {
            format!("'{}' already deploys with {}; nothing to do\n", project, deployer)
        }
        SwitchOutcome::Cancelled { project } => {
            format!("Switch of '{}' cancelled; nothing was changed\n", project)
        }
        SwitchOutcome::Switched(report) => {
            let mut out = format!(
                "Switched '{}' from {} to {}\n",
                report.project,
                report.from.as_deref().unwrap_or("(none)"),
                report.to
            );
            if let Some(removed) = &report.removed {
                out.push_str(&format!("  removed  {}\n", relative(removed)));
            }
            for path in report.written.iter().chain(&report.workflows) {
                out.push_str(&format!("  wrote    {}\n", relative(path)));
            }
            if let Some(leftover) = &report.leftover {
                out.push_str(&format!(
                    "  warning: previous files left in {}; delete it by hand\n",
                    relative(leftover)
                ));
            }
            out
        }
    }
}
