//! Composition root. This is the only place that names concrete outbound adapters.

use std::{sync::Arc, time::Duration};

use crate::{
    adapters::outbound::memory::{InMemoryProjectRepository, InMemoryUserRepository},
    config::{SeedError, Settings},
    domain::{
        ports::{inbound::ProjectService, outbound::UserRepository},
        services::ProjectServiceImpl,
    },
};

pub struct Services {
    pub project_service: Arc<dyn ProjectService>,
    pub users: Arc<dyn UserRepository>,
}

/// Seeds the in-memory stores from `settings` and wires the services on top.
pub fn build_services(settings: &Settings) -> Result<Services, SeedError> {
    let latency = Duration::from_millis(settings.application.simulated_latency_ms);
    let users = settings.seed.users()?;
    let project = settings.seed.project();

    tracing::debug!(
        users = users.len(),
        investors = project.investors.len(),
        latency_ms = settings.application.simulated_latency_ms,
        "Seeding in-memory stores"
    );

    let project_repository = InMemoryProjectRepository::new(project).with_latency(latency);
    let user_repository = InMemoryUserRepository::new(users).with_latency(latency);

    Ok(Services {
        project_service: Arc::new(ProjectServiceImpl::new(Arc::new(project_repository))),
        users: Arc::new(user_repository),
    })
}
