//! Test fixtures - reusable workspace documents

/// Three projects: an image-built helm service, a static site fanned out to
/// two helm instances, and a firebase-hosted site.
pub const WORKSPACE_JSON: &str = r#"{
    "version": 1,
    "workspace": {"name": "acme"},
    "environments": {
        "production": {"registry": "reg.example/prod", "namespace": "acme-prod"}
    },
    "projects": {
        "api": {
            "root": "apps/api",
            "type": "go",
            "architect": {
                "build": {
                    "builder": "bazel",
                    "configurations": {"production": {}, "staging": {}}
                },
                "deploy": {"deployer": "helm", "options": {"chartPath": "chart", "port": 8080}}
            }
        },
        "web": {
            "root": "apps/web",
            "type": "vue",
            "architect": {
                "build": {"builder": "vite", "configurations": {"production": {}}},
                "deploy": {"deployer": "helm", "options": {"instances": ["a", "b"]}}
            }
        },
        "site": {
            "root": "apps/site",
            "type": "angular",
            "architect": {
                "build": {"builder": "angular", "configurations": {"production": {}}},
                "deploy": {"deployer": "firebase"}
            }
        }
    }
}"#;

/// A single helm project with a deployment folder of its own
pub const SINGLE_HELM_JSON: &str = r#"{
    "version": 1,
    "workspace": {"name": "acme"},
    "projects": {
        "api": {
            "root": "apps/api",
            "type": "go",
            "architect": {
                "build": {"builder": "bazel", "configurations": {"production": {}}},
                "deploy": {"deployer": "helm", "options": {"configPath": "deploy"}}
            }
        }
    }
}"#;
