use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::{app_state::AppState, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(self::get::me))
        .route("/login", post(self::post::login))
        .route("/logout", get(self::get::logout))
}

mod post {
    use tracing::instrument;

    use crate::{
        auth::backend::{AuthSession, Credentials},
        domain::User,
    };

    use super::*;

    #[instrument(name = "login", skip_all)]
    pub async fn login(
        mut auth_session: AuthSession,
        Json(creds): Json<Credentials>,
    ) -> Result<Json<User>, ApiError> {
        if creds.mobile_number.trim().is_empty() || creds.password.is_empty() {
            return Err(ApiError::bad_request(
                "Please enter both mobile number and password.",
            ));
        }

        let user = match auth_session.authenticate(creds).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!("Rejected login with invalid credentials");
                return Err(ApiError::unauthorized(
                    "Invalid credentials. Please try again.",
                ));
            }
            Err(e) => {
                tracing::error!("Authentication failed: {}", e);
                return Err(ApiError::internal("authentication failed"));
            }
        };

        if let Err(e) = auth_session.login(&user).await {
            tracing::error!("Failed to log in user: {}", e);
            return Err(ApiError::internal("failed to start session"));
        }

        tracing::info!(user_id = %user.id, role = user.role.name(), "User logged in");
        Ok(Json(user))
    }
}

mod get {
    use allocation::{Investor, InvestorId};
    use axum::extract::State;
    use axum_login::AuthzBackend;
    use itertools::Itertools;
    use serde::Serialize;

    use crate::{
        auth::{backend::AuthSession, AuthUser},
        domain::{Permission, User},
    };

    use super::*;

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Contribution {
        id: InvestorId,
        name: String,
        amount: String,
        value: f64,
    }

    impl From<&Investor> for Contribution {
        fn from(investor: &Investor) -> Self {
            Self {
                id: investor.id,
                name: investor.name.clone(),
                amount: investor.amount.to_text(),
                value: investor.amount.value(),
            }
        }
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Profile {
        user: User,
        role: &'static str,
        permissions: Vec<Permission>,
        currency: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contribution: Option<Contribution>,
    }

    pub async fn me(
        user: AuthUser,
        auth_session: AuthSession,
        State(app_state): State<AppState>,
    ) -> Result<Json<Profile>, ApiError> {
        let permissions = auth_session
            .backend
            .get_user_permissions(&user)
            .await
            .map_err(|e| {
                tracing::error!("Failed to resolve permissions: {}", e);
                ApiError::internal("failed to resolve permissions")
            })?
            .into_iter()
            .sorted_by_key(|p| p.to_string())
            .collect();

        let stored = app_state.project_service.load_project().await?;
        let contribution = user
            .role
            .investor_id()
            .and_then(|id| stored.project.investor(id))
            .map(Contribution::from);

        Ok(Json(Profile {
            role: user.role.name(),
            user: (*user).clone(),
            permissions,
            currency: stored.project.currency,
            contribution,
        }))
    }

    pub async fn logout(mut auth_session: AuthSession) -> impl IntoResponse {
        match auth_session.logout().await {
            Ok(_) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => {
                tracing::error!("Failed to log out: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
