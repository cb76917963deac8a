use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{
    models::{Project, SavedProject, StoredProject},
    ports::{inbound::ProjectService, outbound::ProjectRepository},
    Permission, ProjectError, Role,
};

/// Implementation of the ProjectService inbound port.
pub struct ProjectServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> ProjectServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProjectRepository> ProjectService for ProjectServiceImpl<R> {
    async fn load_project(&self) -> Result<StoredProject, ProjectError> {
        Ok(self.repository.load_project().await?)
    }

    #[instrument(skip(self, project))]
    async fn save_project(
        &self,
        role: &Role,
        project: Project,
    ) -> Result<SavedProject, ProjectError> {
        if !role.has_permission(Permission::SaveProject) {
            tracing::warn!("Rejected project save from a read-only role");
            return Err(ProjectError::Forbidden);
        }
        project.validate()?;

        let current = self.repository.load_project().await?;
        let changes = current.project.diff(&project);
        if changes.is_empty() {
            tracing::debug!("Project unchanged, nothing to save");
            return Ok(SavedProject {
                stored: current,
                changes,
            });
        }

        let stored = self.repository.save_project(&project).await?;
        tracing::info!(
            version = stored.version,
            changes = changes.len(),
            "Saved project"
        );

        Ok(SavedProject { stored, changes })
    }
}

#[cfg(test)]
mod tests {
    use allocation::{Investor, InvestorId};

    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryProjectRepository,
        domain::{models::fixtures::default_project, RepositoryError},
    };

    struct UnavailableProjectRepository;

    #[async_trait]
    impl ProjectRepository for UnavailableProjectRepository {
        async fn load_project(&self) -> Result<StoredProject, RepositoryError> {
            Ok(StoredProject::new(default_project()))
        }

        async fn save_project(&self, _project: &Project) -> Result<StoredProject, RepositoryError> {
            Err(RepositoryError::Unavailable("offline".to_string()))
        }
    }

    fn service() -> ProjectServiceImpl<InMemoryProjectRepository> {
        ProjectServiceImpl::new(Arc::new(InMemoryProjectRepository::new(default_project())))
    }

    #[tokio::test]
    async fn management_save_bumps_the_version() {
        let service = service();
        let mut project = default_project();
        project.sell_price = "25000".to_string();

        let saved = service
            .save_project(&Role::Management, project.clone())
            .await
            .unwrap();

        assert_eq!(saved.stored.version, 1);
        assert_eq!(saved.changes.len(), 1);
        assert_eq!(service.load_project().await.unwrap().project, project);
    }

    #[tokio::test]
    async fn investors_cannot_save() {
        let service = service();
        let mut project = default_project();
        project.cost = "1".to_string();

        let result = service
            .save_project(&Role::Investor(InvestorId::new(1)), project)
            .await;

        assert!(matches!(result, Err(ProjectError::Forbidden)));
        assert_eq!(service.load_project().await.unwrap().project, default_project());
    }

    #[tokio::test]
    async fn unchanged_project_is_not_rewritten() {
        let service = service();

        let saved = service
            .save_project(&Role::Management, default_project())
            .await
            .unwrap();

        assert!(saved.changes.is_empty());
        assert_eq!(saved.stored.version, 0);
    }

    #[tokio::test]
    async fn duplicate_investor_ids_are_not_saved() {
        let service = service();
        let mut project = default_project();
        project.investors.push(Investor::new(1, "Alice again", "1"));

        let result = service.save_project(&Role::Management, project).await;

        assert!(matches!(result, Err(ProjectError::DuplicateInvestorId(_))));
        assert_eq!(service.load_project().await.unwrap().version, 0);
    }

    #[tokio::test]
    async fn store_failures_are_reported() {
        let service = ProjectServiceImpl::new(Arc::new(UnavailableProjectRepository));
        let mut project = default_project();
        project.cost = "13000".to_string();

        let result = service.save_project(&Role::Management, project).await;

        assert!(matches!(
            result,
            Err(ProjectError::Repository(RepositoryError::Unavailable(_)))
        ));
    }
}
