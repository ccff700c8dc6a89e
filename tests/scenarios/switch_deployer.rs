//! Scenario: Switching a Project's Deployer
//!
//! Journey: A team moves its API from helm to Cloud Run, then to firebase
//! from a CI job.
//!
//! Steps:
//! 1. Project deploys with helm from `apps/api/deploy`
//! 2. Runs `keel switch api cloudrun` without confirming - nothing changes
//! 3. Runs it again with `--yes` - old folder replaced, workspace and
//!    workflow rewritten
//! 4. Runs a switch with `--json` and reads the NDJSON event stream
//!
//! Success Criteria:
//! - Declining leaves every file untouched
//! - No staging or retired folder is left behind after a successful switch
//! - Switching to the active deployer is a no-op

use crate::common::*;

fn helm_env() -> TestEnv {
    TestEnv::builder()
        .with_workspace(SINGLE_HELM_JSON)
        .with_file("apps/api/deploy/Chart.yaml", "name: api\n")
        .build()
}

/// Staging and retired-folder directories left in the workspace root
fn staging_dirs(env: &TestEnv) -> Vec<String> {
    std::fs::read_dir(env.workspace_root.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with(".keel-stage-") || name.starts_with(".keel-retired-"))
        .collect()
}

#[test]
fn scenario_switch_without_confirmation_changes_nothing() {
    let env = helm_env();
    let before = env.read("keel.json");

    let result = env.run(&["switch", "api", "cloudrun"]);
    assert!(result.success, "switch failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("cancelled"), "stdout:\n{}", result.stdout);

    assert_eq!(env.read("keel.json"), before);
    assert!(env.path("apps/api/deploy/Chart.yaml").exists());
    assert!(!env.path(".github/workflows/keel-deploy.yml").exists());
    assert!(staging_dirs(&env).is_empty());
}

#[test]
fn scenario_switch_to_cloudrun_with_yes() {
    let env = helm_env();

    let result = env.run(&["switch", "api", "cloudrun", "--yes", "--set", "port=9000"]);
    assert!(result.success, "switch failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("Switched 'api' from helm to cloudrun"));

    assert!(!env.path("apps/api/deploy/Chart.yaml").exists());
    let service = env.read("apps/api/deploy/service.yaml");
    assert!(service.contains("containerPort: 9000"));
    assert!(env.path("apps/api/deploy/envs/production/config.yaml").exists());

    let doc = env.workspace_document();
    let deploy = &doc["projects"]["api"]["architect"]["deploy"];
    assert_eq!(deploy["deployer"], "cloudrun");
    assert_eq!(deploy["options"]["port"], 9000);
    assert_eq!(deploy["options"]["configPath"], "deploy");
    assert!(deploy["configurations"]["production"].is_object());
    assert_eq!(doc["projects"]["api"]["metadata"]["deployer"], "cloudrun");

    let workflow = env.read(".github/workflows/keel-deploy.yml");
    assert!(workflow.contains("deploy-cloudrun:"));
    assert!(!workflow.contains("deploy-helm:"));

    assert!(staging_dirs(&env).is_empty());
}

#[test]
fn scenario_switch_to_active_deployer_is_noop() {
    let env = helm_env();
    let before = env.read("keel.json");

    let result = env.run(&["switch", "api", "helm", "--yes"]);
    assert!(result.success, "switch failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("already deploys with helm"));
    assert_eq!(env.read("keel.json"), before);
    assert!(env.path("apps/api/deploy/Chart.yaml").exists());
}

#[test]
fn scenario_switch_rejects_unknown_deployer() {
    let env = helm_env();

    let result = env.run(&["switch", "api", "netlify", "--yes"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("unknown deployer 'netlify'"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(env.path("apps/api/deploy/Chart.yaml").exists());
}

#[test]
fn scenario_switch_json_event_stream() {
    let env = helm_env();

    let result = env.run(&[
        "--json",
        "switch",
        "api",
        "firebase",
        "--yes",
        "--set",
        "projectId=acme-web",
        "--config-path",
        "hosting",
    ]);
    assert!(result.success, "switch failed:\n{}", result.combined_output());

    let events = result.json_lines();
    let phases: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "phase_start")
        .filter_map(|e| e["phase"].as_str())
        .collect();
    assert_eq!(
        phases,
        vec![
            "detect-old",
            "confirm-deletion",
            "stage",
            "remove-old",
            "promote",
            "update-config",
            "update-workflows"
        ]
    );
    assert!(events.iter().all(|e| e["timestamp"].is_string() || e["event"] == "result"));

    let last = events.last().unwrap();
    assert_eq!(last["event"], "result");
    assert_eq!(last["outcome"]["status"], "switched");
    assert_eq!(last["outcome"]["from"], "helm");
    assert_eq!(last["outcome"]["to"], "firebase");

    assert!(!env.path("apps/api/deploy").exists());
    let rc: serde_json::Value =
        serde_json::from_str(&env.read("apps/api/hosting/.firebaserc")).unwrap();
    assert_eq!(rc["projects"]["default"], "acme-web");
    assert_eq!(
        env.workspace_document()["projects"]["api"]["architect"]["deploy"]["options"]["configPath"],
        "hosting"
    );
}
