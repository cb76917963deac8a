//! Project store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{Project, StoredProject},
    RepositoryError,
};

/// Outbound port for persisting the single tracked project.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Load the current project snapshot.
    async fn load_project(&self) -> Result<StoredProject, RepositoryError>;

    /// Replace the stored project, returning the new snapshot with its bumped version.
    async fn save_project(&self, project: &Project) -> Result<StoredProject, RepositoryError>;
}
