//! Scenario: Compiling a Workspace
//!
//! Journey: A platform engineer compiles deployment profiles for CI.
//!
//! Steps:
//! 1. Workspace holds a helm service, a fanned-out static site and a
//!    firebase-hosted site
//! 2. Runs `keel compile` and reads the JSON profiles
//! 3. Narrows the selection and overrides the registry
//! 4. Inspects one project's resolved settings
//!
//! Success Criteria:
//! - One profile per build configuration key that yields an artifact
//! - Projects only appear in profiles for keys they configure
//! - Releases fan out per instance; firebase only contributes a marker
//! - Registry precedence: flag → workspace → keel.toml

use crate::common::*;

fn env_with_chart() -> TestEnv {
    TestEnv::builder()
        .with_workspace(WORKSPACE_JSON)
        .with_file("apps/api/chart/values.yaml", "replicaCount: 1\n")
        .with_file("apps/api/chart/envs/production/secrets.yaml", "token: x\n")
        .build()
}

fn names(values: &serde_json::Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn scenario_compile_all_projects() {
    let env = env_with_chart();

    let result = env.run(&["compile"]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());

    let profiles = result.json();
    assert_eq!(names(&profiles), vec!["production", "staging"]);

    let production = &profiles[0];
    assert_eq!(production["artifacts"].as_array().unwrap().len(), 1);
    assert_eq!(production["artifacts"][0]["imageName"], "reg.example/prod/api");
    assert_eq!(
        production["artifacts"][0]["buildTarget"],
        "//apps/api/cmd/server:image"
    );

    let releases = &production["deployment"]["releases"];
    assert_eq!(names(releases), vec!["api", "web-a", "web-b"]);
    assert_eq!(releases[0]["chart"]["kind"], "local");
    assert_eq!(releases[0]["chart"]["ref"], "apps/api/chart");
    assert_eq!(releases[0]["namespace"], "acme-prod");
    assert_eq!(releases[0]["hasSecrets"], true);
    assert_eq!(
        releases[0]["valueFiles"],
        serde_json::json!([
            "apps/api/chart/values.yaml",
            "apps/api/chart/envs/production/values.yaml",
            "apps/api/chart/envs/production/secrets.yaml"
        ])
    );
    assert_eq!(releases[1]["chart"]["kind"], "remote");
    assert_eq!(releases[1]["valueFiles"], serde_json::json!([]));

    let setup = &production["deployment"]["providerSetup"];
    assert_eq!(setup[0]["project"], "site");
    assert_eq!(setup[0]["deployer"], "firebase");

    let staging = &profiles[1];
    assert_eq!(staging["artifacts"][0]["imageName"], "api");
    // web and site declare no staging configuration
    assert_eq!(names(&staging["deployment"]["releases"]), vec!["api"]);
    assert!(staging["deployment"]["providerSetup"].is_null());
    assert_eq!(staging["deployment"]["releases"][0]["hasSecrets"], false);
    assert_eq!(staging["deployment"]["releases"][0]["namespace"], "default");
}

#[test]
fn scenario_compile_selection_and_registry_flag() {
    let env = env_with_chart();

    let result = env.run(&[
        "compile",
        "--project",
        "api",
        "--registry",
        "cli.example",
        "--platform",
        "linux/amd64",
    ]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());

    let profiles = result.json();
    assert_eq!(names(&profiles), vec!["production", "staging"]);
    for profile in profiles.as_array().unwrap() {
        assert_eq!(profile["artifacts"][0]["imageName"], "cli.example/api");
        assert_eq!(names(&profile["deployment"]["releases"]), vec!["api"]);
        let args = profile["artifacts"][0]["buildArgs"].as_array().unwrap();
        assert!(args
            .iter()
            .any(|a| a.as_str().unwrap().contains("linux_amd64")));
    }
}

#[test]
fn scenario_static_only_selection_compiles_nothing() {
    let env = env_with_chart();

    let result = env.run(&["compile", "--project", "web"]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());
    assert_eq!(result.json(), serde_json::json!([]));
}

#[test]
fn scenario_unknown_project_fails_clearly() {
    let env = env_with_chart();

    let result = env.run(&["compile", "--project", "billing"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("project 'billing' not found"),
        "stderr:\n{}",
        result.stderr
    );
}

#[test]
fn scenario_config_registry_fills_in_and_warns_on_typos() {
    let env = TestEnv::builder()
        .with_workspace(WORKSPACE_JSON)
        .with_project_config("[compile]\nregistry = \"fallback.example\"\nregisty = \"x\"\n")
        .build();

    let result = env.run(&["compile", "--project", "api"]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());

    let profiles = result.json();
    assert_eq!(profiles[0]["artifacts"][0]["imageName"], "reg.example/prod/api");
    assert_eq!(profiles[1]["artifacts"][0]["imageName"], "fallback.example/api");
    assert!(result.stderr.contains("Unknown config key 'registy'"));
    assert!(result.stderr.contains("Did you mean 'registry'?"));
}

#[test]
fn scenario_env_var_overrides_user_config() {
    let env = TestEnv::builder()
        .with_workspace(WORKSPACE_JSON)
        .with_home_config("[compile]\nregistry = \"home.example\"\n")
        .build();

    let result = env.run(&["compile", "--project", "api"]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());
    assert_eq!(result.json()[1]["artifacts"][0]["imageName"], "home.example/api");

    let result = env.run_with_env(
        &["compile", "--project", "api"],
        &[("KEEL_REGISTRY", "env.example")],
    );
    assert!(result.success, "compile failed:\n{}", result.combined_output());
    assert_eq!(result.json()[1]["artifacts"][0]["imageName"], "env.example/api");
}

#[test]
fn scenario_compile_from_project_subdirectory() {
    let env = env_with_chart();

    let result = env.run_from(&env.path("apps/api/chart"), &["compile"]);
    assert!(result.success, "compile failed:\n{}", result.combined_output());
    assert_eq!(names(&result.json()), vec!["production", "staging"]);
}

#[test]
fn scenario_resolve_shows_fallback_chain() {
    let env = env_with_chart();

    let result = env.run(&["resolve", "api", "--env", "production"]);
    assert!(result.success, "resolve failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("reg.example/prod"));
    assert!(result.stdout.contains("acme-prod"));
    assert!(result.stdout.contains("us-central1"));

    let result = env.run(&["--json", "resolve", "api", "--env", "staging"]);
    assert!(result.success, "resolve failed:\n{}", result.combined_output());
    let settings = result.json();
    assert_eq!(settings["registry"], "");
    assert_eq!(settings["port"], 8080);
    assert_eq!(settings["namespace"], "default");
    assert_eq!(settings["deployTargets"], serde_json::json!(["helm"]));
    assert_eq!(settings["configPath"], "deploy");
}
