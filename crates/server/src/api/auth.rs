// Session server functions plus the helpers every api/* module shares.

use dioxus::prelude::*;
use shared_types::{Coordinates, User};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// Identify the caller or fail with a JSON-encoded 401.
#[cfg(feature = "server")]
pub(crate) async fn session() -> Result<crate::auth::SessionUser, ServerFnError> {
    crate::auth::require_session()
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Identify the caller, who must be the workspace owner.
#[cfg(feature = "server")]
pub(crate) async fn owner_session() -> Result<crate::auth::SessionUser, ServerFnError> {
    crate::auth::require_owner()
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// The shared workspace handle.
#[cfg(feature = "server")]
pub(crate) fn workforce() -> &'static crate::store::SharedWorkforce {
    &crate::state::get_state().workforce
}

/// Sign in. The session cookie is set on the response.
#[cfg_attr(feature = "server", tracing::instrument(skip(password, location)))]
#[server]
pub async fn login(
    email: String,
    password: Option<String>,
    location: Option<Coordinates>,
) -> Result<User, ServerFnError> {
    use crate::auth::{cookies, request_user_agent};
    use shared_types::LoginRequest;

    let req = LoginRequest {
        email,
        password: password.filter(|p| !p.is_empty()),
        location,
    };
    let res = crate::service::login(crate::state::get_state(), req, request_user_agent())
        .await
        .map_err(|e| e.into_server_fn_error())?;
    cookies::schedule_session_cookie(&res.token);
    Ok(res.user)
}

/// Sign out and clear the session cookie. Never fails.
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Ok(s) = crate::auth::require_session().await {
        workforce().write().await.logout(&s.token);
        tracing::info!(user_id = %s.id(), "Signed out");
    }
    crate::auth::cookies::schedule_clear_cookie();
    Ok(())
}

/// The signed-in user, or `None` when there is no valid session.
#[server]
pub async fn current_user() -> Result<Option<User>, ServerFnError> {
    Ok(crate::auth::require_session().await.ok().map(|s| s.user))
}

/// Owner only: continue this session as another user.
#[server]
pub async fn switch_user(user_id: String) -> Result<User, ServerFnError> {
    let s = owner_session().await?;
    workforce()
        .write()
        .await
        .switch_user(&s.token, s.id(), &user_id)
        .map_err(|e| e.into_server_fn_error())
}
