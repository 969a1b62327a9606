pub mod cookies;
pub mod extractors;
pub mod middleware;

use shared_types::{AppError, User};

/// The signed-in user attached to a request by the session middleware.
///
/// `user` is a copy taken when the request arrived; store operations
/// re-check the actor by id, so a disable mid-request still wins.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub user: User,
    pub token: String,
}

impl SessionUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

/// Identify the caller of a Dioxus server function.
///
/// Checks the middleware-injected `SessionUser` first and falls back to
/// resolving the cookie or Bearer token against the store.
pub async fn require_session() -> Result<SessionUser, AppError> {
    let ctx = dioxus::fullstack::FullstackContext::current()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let headers = {
        let parts = ctx.parts_mut();
        if let Some(session) = parts.extensions.get::<SessionUser>() {
            return Ok(session.clone());
        }
        parts.headers.clone()
    };

    let token = cookies::extract_session_token(&headers)
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    let user = crate::state::get_state()
        .workforce
        .read()
        .await
        .resolve_session(&token)?;
    Ok(SessionUser { user, token })
}

/// Like `require_session`, but only the workspace owner passes.
pub async fn require_owner() -> Result<SessionUser, AppError> {
    let session = require_session().await?;
    if !session.user.role.is_owner() {
        return Err(AppError::owner_only());
    }
    Ok(session)
}

/// Best-effort user agent of the current server-function request.
pub fn request_user_agent() -> String {
    dioxus::fullstack::FullstackContext::current()
        .and_then(|ctx| {
            ctx.parts_mut()
                .headers
                .get(axum::http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}
