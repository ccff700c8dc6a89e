//! Property tests for value resolution fallback chains.

use proptest::prelude::*;

use keel::domain::entities::{EnvironmentDefaults, Project, ProviderDefaults, WorkspaceModel};
use keel::domain::services::resolver::{
    resolve_namespace, resolve_port, resolve_region, resolve_registry, DEFAULT_NAMESPACE,
    DEFAULT_REGION, LOCAL_ENVIRONMENT,
};
use keel::domain::value_objects::{OptionMap, OptionValue};

fn maybe_name() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
        "[a-z][a-z0-9.-]{0,10}".prop_map(Some),
    ]
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn workspace(env: &str, env_value: Option<String>, provider_value: Option<String>) -> WorkspaceModel {
    let mut ws = WorkspaceModel::default();
    ws.environments.insert(
        env.to_string(),
        EnvironmentDefaults {
            registry: env_value.clone(),
            region: env_value.clone(),
            namespace: env_value,
            ..Default::default()
        },
    );
    ws.infrastructure.insert(
        "kubernetes".to_string(),
        ProviderDefaults {
            region: provider_value.clone(),
            namespace: provider_value,
            ..Default::default()
        },
    );
    ws
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Registry takes the first non-blank source in precedence order.
    #[test]
    fn property_registry_first_non_blank_wins(
        explicit in maybe_name(),
        build in maybe_name(),
        env_value in maybe_name(),
        default in maybe_name(),
    ) {
        let ws = workspace("production", env_value.clone(), None);
        let mut options = OptionMap::new();
        if let Some(b) = &build {
            options.insert("registry".to_string(), OptionValue::from(b.as_str()));
        }

        let resolved = resolve_registry(
            &ws,
            "production",
            explicit.as_deref(),
            &options,
            default.as_deref(),
        );

        let expected = present(&explicit)
            .or(present(&build))
            .or(present(&env_value))
            .or(present(&default))
            .unwrap_or("");
        prop_assert_eq!(resolved, expected);
    }

    /// PROPERTY: Region and namespace fall back to fixed defaults, never blank.
    #[test]
    fn property_region_and_namespace_never_blank(
        explicit in maybe_name(),
        env_value in maybe_name(),
        provider_value in maybe_name(),
    ) {
        let ws = workspace("staging", env_value.clone(), provider_value.clone());

        let region = resolve_region(&ws, "staging", "kubernetes", explicit.as_deref());
        let namespace = resolve_namespace(&ws, "staging", "kubernetes", explicit.as_deref());

        let expected = |default: &'static str| {
            present(&explicit)
                .or(present(&env_value))
                .or(present(&provider_value))
                .unwrap_or(default)
                .to_string()
        };
        prop_assert_eq!(&region, &expected(DEFAULT_REGION));
        prop_assert_eq!(&namespace, &expected(DEFAULT_NAMESPACE));
        prop_assert!(!region.trim().is_empty());
        prop_assert!(!namespace.trim().is_empty());
    }

    /// PROPERTY: The local port override applies only to the local environment.
    #[test]
    fn property_local_port_only_in_local(
        local_port in 1024u16..u16::MAX,
        environment in prop_oneof![Just("local"), Just("staging"), Just("production")],
    ) {
        let mut project = Project {
            name: "api".to_string(),
            root: "apps/api".to_string(),
            language: "go".to_string(),
            ..Default::default()
        };
        let mut overrides = OptionMap::new();
        overrides.insert("port".to_string(), OptionValue::Integer(i64::from(local_port)));
        project.local.insert("helm".to_string(), overrides);

        let port = resolve_port(&project, environment, "helm");
        if environment == LOCAL_ENVIRONMENT {
            prop_assert_eq!(port, local_port);
        } else {
            prop_assert_eq!(port, 8080);
        }
    }
}
