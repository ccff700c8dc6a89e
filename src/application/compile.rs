//! Compile Use Case
//!
//! Loads the workspace document and compiles profiles for the selected
//! projects.

use crate::domain::entities::Profile;
use crate::domain::ports::{FileSystem, WorkspaceRepository};
use crate::domain::services::{CompileSettings, ProducerRegistry, ProfileCompiler};
use crate::error::KeelResult;

/// Compile use case - parameterized by its ports
pub struct CompileUseCase<R, FS>
where
    R: WorkspaceRepository,
    FS: FileSystem,
{
    repo: R,
    fs: FS,
    producers: ProducerRegistry,
}

impl<R, FS> CompileUseCase<R, FS>
where
    R: WorkspaceRepository,
    FS: FileSystem,
{
    pub fn new(repo: R, fs: FS, producers: ProducerRegistry) -> Self {
        Self {
            repo,
            fs,
            producers,
        }
    }

    /// Compile profiles for `selected` projects (every project when empty).
    pub fn execute(
        &self,
        settings: &CompileSettings,
        selected: &[String],
    ) -> KeelResult<Vec<Profile>> {
        let workspace = self.repo.load()?;
        tracing::debug!(
            projects = workspace.projects.len(),
            selected = selected.len(),
            "compiling profiles"
        );
        let profiles =
            ProfileCompiler::new(&self.producers, &self.fs, settings).compile(&workspace, selected)?;
        Ok(profiles)
    }
}
