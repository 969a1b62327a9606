use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, NewEmployeeRequest, UpdateUserStatusRequest, User};

use crate::auth::extractors::OwnerUser;
use crate::error_convert::ValidateRequest;
use crate::store::SharedWorkforce;

/// Everyone in the workspace.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 403, description = "Owner only", body = AppError)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(_owner): OwnerUser,
) -> Json<Vec<User>> {
    Json(workforce.read().await.users().to_vec())
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewEmployeeRequest,
    responses(
        (status = 201, description = "Employee added", body = User),
        (status = 409, description = "Email already in use", body = AppError),
        (status = 422, description = "Invalid fields", body = AppError)
    ),
    tag = "users"
)]
pub async fn add_employee(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Json(body): Json<NewEmployeeRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    body.validate_request()?;
    let user = workforce.write().await.add_employee(session.id(), body)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Grant or deny workspace access.
#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = User),
        (status = 400, description = "Cannot change your own access", body = AppError),
        (status = 404, description = "No such user", body = AppError)
    ),
    tag = "users"
)]
pub async fn update_user_status(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserStatusRequest>,
) -> Result<Json<User>, AppError> {
    let user = workforce
        .write()
        .await
        .toggle_user_status(session.id(), &id, body.status)?;
    Ok(Json(user))
}
