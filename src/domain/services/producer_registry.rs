//! Producer registry
//!
//! Explicit lookup table from builder/deployer identifiers to producers.
//! Callers construct it (usually via `builtin`) and pass it to the compilers.

use std::collections::BTreeMap;

use crate::domain::ports::{ArtifactProducer, ReleaseProducer};
use crate::domain::services::artifact_compiler::{ImageArtifactProducer, StaticBundleProducer};
use crate::domain::services::release_compiler::{ChartReleaseProducer, ProviderSetupProducer};
use crate::domain::value_objects::{ChartDefaults, Deployer};

/// Builders that compile to a container image
pub const IMAGE_BUILDERS: [&str; 2] = ["bazel", "ko"];

/// Builders that produce a static bundle
pub const BUNDLE_BUILDERS: [&str; 3] = ["vite", "angular", "static"];

pub struct ProducerRegistry {
    artifacts: BTreeMap<String, Box<dyn ArtifactProducer>>,
    releases: BTreeMap<String, Box<dyn ReleaseProducer>>,
}

impl ProducerRegistry {
    /// Registry with no producers
    pub fn empty() -> Self {
        Self {
            artifacts: BTreeMap::new(),
            releases: BTreeMap::new(),
        }
    }

    /// Built-in builders and deployers, with `charts` as the per-language chart table
    pub fn builtin(charts: ChartDefaults) -> Self {
        let mut registry = Self::empty();
        for builder in IMAGE_BUILDERS {
            registry = registry.with_artifact_producer(builder, ImageArtifactProducer);
        }
        for builder in BUNDLE_BUILDERS {
            registry = registry.with_artifact_producer(builder, StaticBundleProducer);
        }
        for deployer in Deployer::ALL {
            registry = if deployer.is_chart_based() {
                let producer = ChartReleaseProducer::new(charts.clone());
                registry.with_release_producer(deployer.id(), producer)
            } else {
                registry.with_release_producer(deployer.id(), ProviderSetupProducer::new(deployer))
            };
        }
        registry
    }

    pub fn with_artifact_producer(
        mut self,
        builder: impl Into<String>,
        producer: impl ArtifactProducer + 'static,
    ) -> Self {
        self.artifacts.insert(builder.into(), Box::new(producer));
        self
    }

    pub fn with_release_producer(
        mut self,
        deployer: impl Into<String>,
        producer: impl ReleaseProducer + 'static,
    ) -> Self {
        self.releases.insert(deployer.into(), Box::new(producer));
        self
    }

    pub fn artifact_producer(&self, builder: &str) -> Option<&dyn ArtifactProducer> {
        self.artifacts.get(builder).map(|p| p.as_ref())
    }

    pub fn release_producer(&self, deployer: &str) -> Option<&dyn ReleaseProducer> {
        self.releases.get(deployer).map(|p| p.as_ref())
    }

    pub fn builders(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    pub fn deployers(&self) -> impl Iterator<Item = &str> {
        self.releases.keys().map(String::as_str)
    }
}

impl Default for ProducerRegistry {
    fn default() -> Self {
        Self::builtin(ChartDefaults::default())
    }
}

impl std::fmt::Debug for ProducerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerRegistry")
            .field("builders", &self.builders().collect::<Vec<_>>())
            .field("deployers", &self.deployers().collect::<Vec<_>>())
            .finish()
    }
}
