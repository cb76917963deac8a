//! Management editing flow.
//!
//! Each session holds its own [`ProjectDraft`]. Edits only touch the draft;
//! `POST /save` hands it to the project service and rebases it on success.
//! A failed save leaves the draft, and therefore its dirty state, as it was.

use allocation::{AllocationResult, InvestorId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use axum_login::tower_sessions::Session;
use serde::Serialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::{
        models::{Project, ProjectChange, StoredProject},
        InvestorUpdate, NewInvestor, Permission, ProjectDraft, ProjectFieldsUpdate,
    },
    routes::ApiError,
};

const DRAFT_KEY: &str = "project.draft";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_draft).put(update_draft).delete(discard_draft))
        .route("/investors", post(add_investor))
        .route(
            "/investors/:investor_id",
            put(update_investor).delete(remove_investor),
        )
        .route("/save", post(save_draft))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    project: Project,
    base_version: u64,
    is_dirty: bool,
    /// The store has been saved since this draft was taken.
    is_stale: bool,
    changes: Vec<ProjectChange>,
    allocation: AllocationResult,
}

impl DraftView {
    fn new(draft: &ProjectDraft, stored: &StoredProject) -> Self {
        let changes = draft.changes();
        Self {
            project: draft.project().clone(),
            base_version: draft.base_version(),
            is_dirty: !changes.is_empty(),
            is_stale: draft.is_stale(stored),
            changes,
            allocation: draft.project().allocation(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    success: bool,
    message: String,
    version: u64,
    draft: DraftView,
}

fn session_error(err: impl std::fmt::Display) -> ApiError {
    tracing::error!("Session store error: {}", err);
    ApiError::internal("session store error")
}

/// Loads the session's draft, starting a fresh one from the store if needed.
async fn load_draft(
    session: &Session,
    app_state: &AppState,
) -> Result<(ProjectDraft, StoredProject), ApiError> {
    let stored = app_state.project_service.load_project().await?;

    let draft = match session
        .get::<ProjectDraft>(DRAFT_KEY)
        .await
        .map_err(session_error)?
    {
        Some(mut draft) => {
            if draft.refresh(&stored) {
                tracing::debug!(version = stored.version, "Clean draft moved to newer snapshot");
                store_draft(session, &draft).await?;
            }
            draft
        }
        None => ProjectDraft::new(&stored),
    };

    Ok((draft, stored))
}

async fn store_draft(session: &Session, draft: &ProjectDraft) -> Result<(), ApiError> {
    session
        .insert(DRAFT_KEY, draft)
        .await
        .map_err(session_error)
}

/// Applies `edit` to the session's draft and persists it only if the edit succeeded.
async fn edit_draft<T>(
    session: &Session,
    app_state: &AppState,
    edit: impl FnOnce(&mut ProjectDraft) -> Result<T, crate::domain::DraftError>,
) -> Result<(T, DraftView), ApiError> {
    let (mut draft, stored) = load_draft(session, app_state).await?;

    let output = edit(&mut draft).map_err(|e| {
        tracing::warn!("Rejected draft edit: {}", e);
        ApiError::from(e)
    })?;
    store_draft(session, &draft).await?;

    Ok((output, DraftView::new(&draft, &stored)))
}

async fn get_draft(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
) -> Result<Json<DraftView>, ApiError> {
    user.require(Permission::EditProject)?;

    let (draft, stored) = load_draft(&session, &app_state).await?;
    Ok(Json(DraftView::new(&draft, &stored)))
}

async fn update_draft(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
    Json(update): Json<ProjectFieldsUpdate>,
) -> Result<Json<DraftView>, ApiError> {
    user.require(Permission::EditProject)?;

    let ((), view) = edit_draft(&session, &app_state, |draft| draft.update_fields(update)).await?;
    Ok(Json(view))
}

async fn add_investor(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
    Json(new): Json<NewInvestor>,
) -> Result<(StatusCode, Json<DraftView>), ApiError> {
    user.require(Permission::ManageInvestors)?;

    let (id, view) = edit_draft(&session, &app_state, |draft| draft.add_investor(new)).await?;
    tracing::debug!(investor_id = %id, "Added investor to draft");

    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_investor(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
    Path(investor_id): Path<i64>,
    Json(update): Json<InvestorUpdate>,
) -> Result<Json<DraftView>, ApiError> {
    user.require(Permission::EditProject)?;

    let id = InvestorId::new(investor_id);
    let ((), view) =
        edit_draft(&session, &app_state, |draft| draft.update_investor(id, update)).await?;
    Ok(Json(view))
}

async fn remove_investor(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
    Path(investor_id): Path<i64>,
) -> Result<Json<DraftView>, ApiError> {
    user.require(Permission::ManageInvestors)?;

    let id = InvestorId::new(investor_id);
    let ((), view) = edit_draft(&session, &app_state, |draft| draft.remove_investor(id)).await?;
    Ok(Json(view))
}

#[instrument(skip_all, fields(user_id = %user.id))]
async fn save_draft(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
) -> Result<Json<SaveResponse>, ApiError> {
    user.require(Permission::SaveProject)?;

    let (mut draft, stored) = load_draft(&session, &app_state).await?;
    if draft.is_stale(&stored) {
        tracing::warn!(
            base_version = draft.base_version(),
            stored_version = stored.version,
            "Saving a draft based on an older snapshot"
        );
    }

    let saved = app_state
        .project_service
        .save_project(&user.role, draft.project().clone())
        .await?;

    let message = if saved.changes.is_empty() {
        "No changes to save."
    } else {
        "Project data saved successfully."
    };

    draft.rebase(&saved.stored);
    store_draft(&session, &draft).await?;

    Ok(Json(SaveResponse {
        success: true,
        message: message.to_string(),
        version: saved.stored.version,
        draft: DraftView::new(&draft, &saved.stored),
    }))
}

async fn discard_draft(
    user: AuthUser,
    session: Session,
    State(app_state): State<AppState>,
) -> Result<Json<DraftView>, ApiError> {
    user.require(Permission::EditProject)?;

    session
        .remove::<ProjectDraft>(DRAFT_KEY)
        .await
        .map_err(session_error)?;

    let (draft, stored) = load_draft(&session, &app_state).await?;
    Ok(Json(DraftView::new(&draft, &stored)))
}
