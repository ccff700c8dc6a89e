//! Property tests for profile compilation.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use tempfile::TempDir;

use keel::domain::entities::{Architect, BuildSpec, DeploySpec, Project, WorkspaceModel};
use keel::domain::services::{compile_profiles, compile_releases, CompileSettings, ProducerRegistry};
use keel::domain::ports::ReleasePlan;
use keel::domain::value_objects::{OptionMap, OptionValue};
use keel::infrastructure::LocalFs;

const KEYS: [&str; 4] = ["dev", "preview", "production", "staging"];

#[derive(Debug, Clone)]
struct ProjectShape {
    builder: &'static str,
    keys: BTreeSet<&'static str>,
    deployer: Option<&'static str>,
}

fn project_shape() -> impl Strategy<Value = ProjectShape> {
    (
        prop_oneof![Just("bazel"), Just("ko"), Just("vite"), Just("make")],
        proptest::sample::subsequence(KEYS.to_vec(), 0..=KEYS.len()),
        prop_oneof![
            Just(None),
            Just(Some("helm")),
            Just(Some("firebase")),
            Just(Some("cloudrun")),
        ],
    )
        .prop_map(|(builder, keys, deployer)| ProjectShape {
            builder,
            keys: keys.into_iter().collect(),
            deployer,
        })
}

fn build_workspace(shapes: &[ProjectShape]) -> WorkspaceModel {
    let mut ws = WorkspaceModel::default();
    for (i, shape) in shapes.iter().enumerate() {
        let name = format!("p{}", i);
        let project = Project {
            name: name.clone(),
            root: format!("apps/{}", name),
            language: "go".to_string(),
            architect: Architect {
                build: Some(BuildSpec {
                    builder: shape.builder.to_string(),
                    configurations: shape
                        .keys
                        .iter()
                        .map(|k| (k.to_string(), OptionMap::new()))
                        .collect(),
                    ..Default::default()
                }),
                deploy: shape.deployer.map(|d| DeploySpec {
                    deployer: d.to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        ws.projects.insert(name, project);
    }
    ws
}

fn is_image_builder(builder: &str) -> bool {
    matches!(builder, "bazel" | "ko")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every emitted profile has an artifact; exactly the keys
    /// declared by an image-built project produce a profile, in sorted order,
    /// and only projects declaring the key contribute to it.
    #[test]
    fn property_profiles_without_artifacts_are_discarded(
        shapes in proptest::collection::vec(project_shape(), 0..5),
    ) {
        let root = TempDir::new().unwrap();
        let ws = build_workspace(&shapes);
        let settings = CompileSettings::new(root.path());

        let profiles = compile_profiles(
            &ProducerRegistry::default(),
            &LocalFs::new(),
            &settings,
            &ws,
            &[],
        )
        .unwrap();

        let expected: Vec<&str> = shapes
            .iter()
            .filter(|s| is_image_builder(s.builder))
            .flat_map(|s| s.keys.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names, expected);
        prop_assert!(profiles.iter().all(|p| !p.artifacts.is_empty()));

        for profile in &profiles {
            let declaring = shapes
                .iter()
                .filter(|s| s.keys.contains(profile.name.as_str()));
            let image_projects = declaring
                .clone()
                .filter(|s| is_image_builder(s.builder))
                .count();
            prop_assert_eq!(profile.artifacts.len(), image_projects);

            let deploying = declaring.filter(|s| s.deployer.is_some()).count();
            prop_assert_eq!(
                profile.deployment.releases.len() + profile.deployment.provider_setup.len(),
                deploying
            );
        }
    }

    /// PROPERTY: Fan-out yields one release per named instance, suffixed
    /// with the instance name, and ignores blank names.
    #[test]
    fn property_fan_out_cardinality(
        names in proptest::collection::btree_set("[a-z]{1,6}", 0..6),
        blanks in 0usize..3,
    ) {
        let root = TempDir::new().unwrap();
        let mut items: Vec<OptionValue> = names.iter().map(|n| OptionValue::from(n.as_str())).collect();
        items.extend(std::iter::repeat(OptionValue::from("")).take(blanks));

        let mut options = OptionMap::new();
        options.insert("instances".to_string(), OptionValue::List(items));
        let project = Project {
            name: "web".to_string(),
            root: "apps/web".to_string(),
            language: "vue".to_string(),
            architect: Architect {
                deploy: Some(DeploySpec {
                    deployer: "helm".to_string(),
                    options,
                    configurations: BTreeMap::new(),
                    default_configuration: None,
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let plan = compile_releases(
            &ProducerRegistry::default(),
            &WorkspaceModel::default(),
            &project,
            "production",
            root.path(),
            &LocalFs::new(),
        );

        match plan {
            Some(ReleasePlan::Releases(releases)) => {
                prop_assert_eq!(releases.len(), names.len());
                let released: BTreeSet<String> = releases.into_iter().map(|r| r.name).collect();
                let expected: BTreeSet<String> = names.iter().map(|n| format!("web-{}", n)).collect();
                prop_assert_eq!(released, expected);
            }
            other => prop_assert!(false, "expected releases, got {:?}", other),
        }
    }
}
