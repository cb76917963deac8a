use allocation::AllocationResult;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::{models::Project, visible_project, visible_results},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_project))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    project: Project,
    version: u64,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    allocation: AllocationResult,
}

async fn get_project(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectView>, ApiError> {
    let stored = app_state.project_service.load_project().await?;

    // Totals are computed over every investor before the view is narrowed.
    let allocation = visible_results(&user.role, stored.project.allocation());

    Ok(Json(ProjectView {
        project: visible_project(&user.role, stored.project),
        version: stored.version,
        updated_at: stored.updated_at,
        allocation,
    }))
}
