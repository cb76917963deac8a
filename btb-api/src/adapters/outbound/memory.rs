//! In-process stores standing in for a real backend.
//!
//! Both stores can be given an artificial latency so clients see the same
//! loading behaviour they would against a networked store.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::domain::{
    models::{Project, StoredProject, UserId},
    ports::outbound::{ProjectRepository, UserRepository},
    RepositoryError, User,
};

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[derive(Clone)]
pub struct InMemoryProjectRepository {
    project: Arc<RwLock<StoredProject>>,
    latency: Duration,
}

impl InMemoryProjectRepository {
    pub fn new(project: Project) -> Self {
        Self {
            project: Arc::new(RwLock::new(StoredProject::new(project))),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn load_project(&self) -> Result<StoredProject, RepositoryError> {
        simulate_latency(self.latency).await;
        Ok(self.project.read().await.clone())
    }

    async fn save_project(&self, project: &Project) -> Result<StoredProject, RepositoryError> {
        simulate_latency(self.latency).await;

        let mut stored = self.project.write().await;
        *stored = StoredProject {
            project: project.clone(),
            version: stored.version + 1,
            updated_at: OffsetDateTime::now_utc(),
        };

        Ok(stored.clone())
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Vec<User>>,
    latency: Duration,
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(users),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_credentials(
        &self,
        mobile_number: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        simulate_latency(self.latency).await;

        Ok(self
            .users
            .iter()
            .find(|u| u.mobile_number == mobile_number && u.password == password)
            .cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        simulate_latency(self.latency).await;

        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}
