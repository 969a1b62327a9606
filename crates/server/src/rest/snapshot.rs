use axum::{extract::State, Json};
use chrono::Utc;
use shared_types::{AppError, WorkspaceSnapshot};

use crate::auth::extractors::CurrentUser;
use crate::store::SharedWorkforce;

/// Everything the UI renders, filtered for the caller's role.
#[utoipa::path(
    get,
    path = "/api/snapshot",
    responses(
        (status = 200, description = "Role-filtered workspace view", body = WorkspaceSnapshot),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "snapshot"
)]
pub async fn get_snapshot(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<WorkspaceSnapshot>, AppError> {
    let snapshot = workforce.read().await.snapshot(session.id(), Utc::now())?;
    Ok(Json(snapshot))
}
