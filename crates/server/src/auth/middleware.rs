use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::SessionUser;
use crate::store::SharedWorkforce;

/// Permissive session middleware.
///
/// On each request it resolves the session token (cookie or Bearer) against
/// the store and inserts a `SessionUser` into the extensions, then inserts a
/// `CookieSlot` so server functions can schedule cookie changes. After the
/// handler runs, any pending cookie action is applied to the response. A
/// token that no longer resolves gets its cookie cleared.
///
/// Does NOT reject unauthenticated requests; downstream handlers decide.
pub async fn session_middleware(
    State(workforce): State<SharedWorkforce>,
    mut req: Request,
    next: Next,
) -> Response {
    let mut stale = false;
    if let Some(token) = cookies::extract_session_token(req.headers()) {
        let resolved = workforce.read().await.resolve_session(&token);
        match resolved {
            Ok(user) => {
                req.extensions_mut().insert(SessionUser { user, token });
            }
            Err(e) => {
                tracing::debug!(error = %e.message, "Dropping stale session token");
                stale = true;
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match cookie_slot.take() {
        Some(PendingCookieAction::Set(token)) => {
            cookies::set_session_cookie(response.headers_mut(), &token);
        }
        Some(PendingCookieAction::Clear) => {
            cookies::clear_session_cookie(response.headers_mut());
        }
        None if stale => cookies::clear_session_cookie(response.headers_mut()),
        None => {}
    }

    response
}
