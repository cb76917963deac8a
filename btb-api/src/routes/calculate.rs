use allocation::{AllocationInput, AllocationResult};
use axum::{routing::post, Json, Router};

use crate::{app_state::AppState, auth::AuthUser};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(compute))
}

/// Runs the engine on client-supplied figures without touching the store.
async fn compute(_user: AuthUser, Json(input): Json<AllocationInput>) -> Json<AllocationResult> {
    Json(input.compute())
}
