use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use axum_login::{AuthnBackend, AuthzBackend, UserId as SessionUserId};
use serde::Deserialize;

use crate::domain::{
    models::UserId, ports::outbound::UserRepository, Permission, RepositoryError, User,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub mobile_number: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("user id {0} is out of range")]
    InvalidUserId(i64),
}

#[derive(Clone)]
pub struct AuthBackend {
    users: Arc<dyn UserRepository>,
}

impl AuthBackend {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthnBackend for AuthBackend {
    type User = User;
    type Credentials = Credentials;
    type Error = BackendError;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        let user = self
            .users
            .find_by_credentials(&creds.mobile_number, &creds.password)
            .await?;

        Ok(user)
    }

    async fn get_user(
        &self,
        user_id: &SessionUserId<Self>,
    ) -> Result<Option<Self::User>, Self::Error> {
        let id = i32::try_from(*user_id).map_err(|_| BackendError::InvalidUserId(*user_id))?;
        let user = self.users.get_user(UserId::new(id)).await?;

        Ok(user)
    }
}

#[async_trait]
impl AuthzBackend for AuthBackend {
    type Permission = Permission;

    async fn get_user_permissions(
        &self,
        user: &Self::User,
    ) -> Result<HashSet<Self::Permission>, Self::Error> {
        let perms = user.role.permissions().into_iter().collect();
        Ok(perms)
    }
}

pub type AuthSession = axum_login::AuthSession<AuthBackend>;
