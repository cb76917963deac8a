use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    domain::{Permission, User},
    routes::ApiError,
};

use super::AuthSession;

/// Extracts the signed-in [`User`] from the request, or rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    user: User,
}

impl AuthUser {
    /// Rejects with 403 unless the user's role grants `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.user.role.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user.id, %permission, "Permission denied");
            Err(ApiError::forbidden(format!("missing permission: {permission}")))
        }
    }
}

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthSession: FromRequestParts<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_session = AuthSession::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unauthorized("Not authenticated"))?;

        let user = auth_session
            .user
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        Ok(AuthUser { user })
    }
}
