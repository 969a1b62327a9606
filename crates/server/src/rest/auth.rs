use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use shared_types::{AppError, LoginRequest, LoginResponse, SwitchUserRequest, User};

use crate::auth::cookies;
use crate::auth::extractors::{CurrentUser, OwnerUser};
use crate::service;
use crate::state::AppState;
use crate::store::SharedWorkforce;

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Sign in by email. Unknown addresses are provisioned as employees.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; the session cookie is set", body = LoginResponse),
        (status = 400, description = "Missing email", body = AppError),
        (status = 401, description = "Wrong password", body = AppError),
        (status = 403, description = "Access revoked", body = AppError),
        (status = 429, description = "Too many attempts", body = AppError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let res = service::login(&state, body, user_agent).await?;

    let mut out = HeaderMap::new();
    cookies::set_session_cookie(&mut out, &res.token);
    Ok((out, Json(res)))
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Signed out; the session cookie is cleared"),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> (StatusCode, HeaderMap) {
    workforce.write().await.logout(&session.token);
    tracing::info!(user_id = %session.id(), "Signed out");

    let mut out = HeaderMap::new();
    cookies::clear_session_cookie(&mut out);
    (StatusCode::NO_CONTENT, out)
}

// ---------------------------------------------------------------------------
// GET /api/auth/me
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The signed-in user", body = User),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
pub async fn me(CurrentUser(session): CurrentUser) -> Json<User> {
    Json(session.user)
}

// ---------------------------------------------------------------------------
// POST /api/auth/switch
// ---------------------------------------------------------------------------

/// Rebind the owner's session to another active user.
#[utoipa::path(
    post,
    path = "/api/auth/switch",
    request_body = SwitchUserRequest,
    responses(
        (status = 200, description = "Now acting as this user", body = User),
        (status = 403, description = "Owner only, or target disabled", body = AppError),
        (status = 404, description = "No such user", body = AppError)
    ),
    tag = "auth"
)]
pub async fn switch_user(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Json(body): Json<SwitchUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = workforce
        .write()
        .await
        .switch_user(&session.token, session.id(), &body.user_id)?;
    Ok(Json(user))
}
