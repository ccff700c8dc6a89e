//! Manifest Generator
//!
//! Writes the starter deployment files for a deployer:
//! - helm: `Chart.yaml`, `values.yaml`, `envs/{env}/values.yaml`
//! - firebase: `firebase.json`, `.firebaserc`
//! - cloudrun: `service.yaml`, `envs/{env}/config.yaml`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::Project;
use crate::domain::ports::{DeployFileGenerator, FileSystem, GenerateError};
use crate::domain::services::resolver::resolve_port;
use crate::domain::value_objects::{string_option, Deployer, OptionMap};
use crate::infrastructure::fs::LocalFs;

const CHART_VERSION: &str = "0.1.0";
const DEFAULT_PUBLIC_DIR: &str = "dist";

/// Built-in deployment file generator
pub struct ManifestGenerator<FS: FileSystem = LocalFs> {
    fs: FS,
}

impl ManifestGenerator<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for ManifestGenerator<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> ManifestGenerator<FS> {
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }

    fn write_yaml<T: Serialize>(
        &self,
        path: PathBuf,
        value: &T,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let content = serde_yaml_ng::to_string(value).map_err(|e| GenerateError::Render {
            what: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.write(path, &content, written)
    }

    fn write_json<T: Serialize>(
        &self,
        path: PathBuf,
        value: &T,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| GenerateError::Render {
                what: path.display().to_string(),
                message: e.to_string(),
            })?;
        content.push('\n');
        self.write(path, &content, written)
    }

    fn write(
        &self,
        path: PathBuf,
        content: &str,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        self.fs
            .write(&path, content)
            .map_err(|e| GenerateError::Write {
                path: path.clone(),
                message: e.to_string(),
            })?;
        written.push(path);
        Ok(())
    }

    fn helm(
        &self,
        project: &Project,
        options: &OptionMap,
        dest: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let chart = ChartManifest {
            api_version: "v2",
            name: &project.name,
            description: format!("Helm chart for {}", project.name),
            kind: "application",
            version: CHART_VERSION,
            app_version: CHART_VERSION,
        };
        self.write_yaml(dest.join("Chart.yaml"), &chart, written)?;

        let values = ChartValues {
            replica_count: 1,
            image: ImageValues {
                repository: &project.name,
                tag: "latest",
            },
            service: ServiceValues {
                port: port(project, options, Deployer::Helm),
            },
            health_check: string_option(options, "healthCheckPath")
                .map(|path| HealthCheckValues { path }),
        };
        self.write_yaml(dest.join("values.yaml"), &values, written)?;

        for (env, overlay) in configurations(project) {
            let path = dest.join("envs").join(env).join("values.yaml");
            self.write_yaml(path, overlay, written)?;
        }
        Ok(())
    }

    fn firebase(
        &self,
        project: &Project,
        options: &OptionMap,
        dest: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let public = string_option(options, "publicDir").unwrap_or(DEFAULT_PUBLIC_DIR);
        let hosting = serde_json::json!({
            "hosting": {
                "public": public,
                "ignore": ["firebase.json", "**/.*", "**/node_modules/**"],
                "rewrites": [{"source": "**", "destination": "/index.html"}],
            }
        });
        self.write_json(dest.join("firebase.json"), &hosting, written)?;

        let mut projects = BTreeMap::new();
        if let Some(id) = string_option(options, "projectId") {
            projects.insert("default".to_string(), id.to_string());
        }
        for (env, overlay) in configurations(project) {
            if let Some(id) = string_option(overlay, "projectId") {
                projects.insert(env.clone(), id.to_string());
            }
        }
        let rc = serde_json::json!({ "projects": projects });
        self.write_json(dest.join(".firebaserc"), &rc, written)
    }

    fn cloudrun(
        &self,
        project: &Project,
        options: &OptionMap,
        dest: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let service = KnativeService {
            api_version: "serving.knative.dev/v1",
            kind: "Service",
            metadata: Metadata {
                name: &project.name,
            },
            spec: ServiceSpec {
                template: Template {
                    spec: TemplateSpec {
                        containers: vec![Container {
                            image: &project.name,
                            ports: vec![ContainerPort {
                                container_port: port(project, options, Deployer::CloudRun),
                            }],
                        }],
                    },
                },
            },
        };
        self.write_yaml(dest.join("service.yaml"), &service, written)?;

        for (env, overlay) in configurations(project) {
            let path = dest.join("envs").join(env).join("config.yaml");
            self.write_yaml(path, overlay, written)?;
        }
        Ok(())
    }
}

impl<FS: FileSystem> DeployFileGenerator for ManifestGenerator<FS> {
    fn generate(
        &self,
        deployer: Deployer,
        project: &Project,
        options: &OptionMap,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let mut written = Vec::new();
        match deployer {
            Deployer::Helm => self.helm(project, options, dest, &mut written)?,
            Deployer::Firebase => self.firebase(project, options, dest, &mut written)?,
            Deployer::CloudRun => self.cloudrun(project, options, dest, &mut written)?,
        }
        Ok(written)
    }
}

fn configurations(project: &Project) -> impl Iterator<Item = (&String, &OptionMap)> {
    project
        .deploy()
        .into_iter()
        .flat_map(|spec| spec.configurations.iter())
}

fn port(project: &Project, options: &OptionMap, deployer: Deployer) -> u16 {
    options
        .get("port")
        .and_then(|p| p.as_port())
        .unwrap_or_else(|| resolve_port(project, "", deployer.id()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartManifest<'a> {
    api_version: &'a str,
    name: &'a str,
    description: String,
    #[serde(rename = "type")]
    kind: &'a str,
    version: &'a str,
    app_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartValues<'a> {
    replica_count: u32,
    image: ImageValues<'a>,
    service: ServiceValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    health_check: Option<HealthCheckValues<'a>>,
}

#[derive(Serialize)]
struct ImageValues<'a> {
    repository: &'a str,
    tag: &'a str,
}

#[derive(Serialize)]
struct ServiceValues {
    port: u16,
}

#[derive(Serialize)]
struct HealthCheckValues<'a> {
    path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KnativeService<'a> {
    api_version: &'a str,
    kind: &'a str,
    metadata: Metadata<'a>,
    spec: ServiceSpec<'a>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ServiceSpec<'a> {
    template: Template<'a>,
}

#[derive(Serialize)]
struct Template<'a> {
    spec: TemplateSpec<'a>,
}

#[derive(Serialize)]
struct TemplateSpec<'a> {
    containers: Vec<Container<'a>>,
}

#[derive(Serialize)]
struct Container<'a> {
    image: &'a str,
    ports: Vec<ContainerPort>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerPort {
    container_port: u16,
}
