//! Switch Options

use crate::domain::value_objects::{OptionMap, OptionValue};

/// Request to move one project onto a new deployer
#[derive(Debug, Clone, Default)]
pub struct SwitchOptions {
    /// Project name as keyed in the workspace
    pub project: String,
    /// Target deployer id (`helm`, `firebase`, `cloudrun`)
    pub deployer: String,
    /// Folder for the new deployment files, relative to the project root
    pub config_path: Option<String>,
    /// Answers collected for the new deployer; nested maps are flattened one level
    pub answers: OptionMap,
    /// Delete the old deployment folder without asking
    pub force: bool,
}

impl SwitchOptions {
    pub fn new(project: impl Into<String>, deployer: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            deployer: deployer.into(),
            ..Default::default()
        }
    }

    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_answers(mut self, answers: OptionMap) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_answer(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.answers.insert(key.into(), value.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
