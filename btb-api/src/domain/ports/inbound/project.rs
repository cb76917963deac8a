use async_trait::async_trait;

use crate::domain::{
    models::{Project, SavedProject, StoredProject},
    ProjectError, Role,
};

/// Inbound port for project use cases invoked by HTTP handlers.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    /// Load the stored project.
    async fn load_project(&self) -> Result<StoredProject, ProjectError>;

    /// Persist `project` on behalf of a user with `role`.
    ///
    /// Only management may save. Investor ids must be unique. Saving a
    /// project identical to the stored one succeeds without bumping the version.
    async fn save_project(&self, role: &Role, project: Project)
        -> Result<SavedProject, ProjectError>;
}
