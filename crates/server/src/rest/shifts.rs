use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared_types::{
    AppError, ConfirmShiftRequest, MessageResponse, ShiftActionRequest, ShiftRequest,
};

use crate::auth::extractors::{CurrentUser, OwnerUser};
use crate::store::SharedWorkforce;

/// Pending shift requests. Employees get only their own, without the code.
#[utoipa::path(
    get,
    path = "/api/shifts",
    responses(
        (status = 200, description = "Pending requests", body = Vec<ShiftRequest>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "shifts"
)]
pub async fn list_shift_requests(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> Json<Vec<ShiftRequest>> {
    let wf = workforce.read().await;
    let requests = if session.user.role.is_owner() {
        wf.shift_requests().to_vec()
    } else {
        wf.shift_requests()
            .iter()
            .filter(|r| r.employee_id == session.user.id)
            .map(ShiftRequest::redacted)
            .collect()
    };
    Json(requests)
}

/// Ask the owner to authorize a shift start or stop.
#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = ShiftActionRequest,
    responses(
        (status = 201, description = "Request queued", body = ShiftRequest),
        (status = 409, description = "Already pending, or wrong shift state", body = AppError)
    ),
    tag = "shifts"
)]
pub async fn request_shift_action(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<ShiftActionRequest>,
) -> Result<(StatusCode, Json<ShiftRequest>), AppError> {
    let req = workforce
        .write()
        .await
        .request_shift_action(session.id(), body.kind, Utc::now())?;
    Ok((StatusCode::CREATED, Json(req)))
}

#[utoipa::path(
    delete,
    path = "/api/shifts/mine",
    responses(
        (status = 204, description = "Own requests withdrawn")
    ),
    tag = "shifts"
)]
pub async fn cancel_shift_request(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> Result<StatusCode, AppError> {
    workforce.write().await.cancel_shift_request(session.id())?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/shifts/{id}",
    params(("id" = String, Path, description = "Shift request id")),
    responses(
        (status = 204, description = "Request denied"),
        (status = 403, description = "Owner only", body = AppError),
        (status = 404, description = "No such request", body = AppError)
    ),
    tag = "shifts"
)]
pub async fn deny_shift_request(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    workforce.write().await.deny_shift_request(session.id(), &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Issue (or reissue) the one-time code for a request.
#[utoipa::path(
    post,
    path = "/api/shifts/{id}/otp",
    params(("id" = String, Path, description = "Shift request id")),
    responses(
        (status = 200, description = "Code issued", body = ShiftRequest),
        (status = 403, description = "Owner only", body = AppError),
        (status = 404, description = "No such request", body = AppError)
    ),
    tag = "shifts"
)]
pub async fn generate_shift_otp(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Path(id): Path<String>,
) -> Result<Json<ShiftRequest>, AppError> {
    let req = workforce
        .write()
        .await
        .generate_shift_otp(session.id(), &id, Utc::now())?;
    Ok(Json(req))
}

/// Enter the code the owner read out. Success flips the shift state.
#[utoipa::path(
    post,
    path = "/api/shifts/confirm",
    request_body = ConfirmShiftRequest,
    responses(
        (status = 200, description = "Shift transition authorized", body = MessageResponse),
        (status = 400, description = "No request, no code yet, expired or wrong code", body = AppError)
    ),
    tag = "shifts"
)]
pub async fn confirm_shift_action(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<ConfirmShiftRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = workforce.write().await.confirm_shift_action(
        session.id(),
        &body.otp,
        body.location,
        Utc::now(),
    )?;
    Ok(Json(MessageResponse { message }))
}
