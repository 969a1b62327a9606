use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::AppError;

use super::SessionUser;

/// Extractor that requires a signed-in, active user. Returns 401 otherwise.
pub struct CurrentUser(pub SessionUser);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that optionally extracts the session. Never fails.
pub struct MaybeUser(pub Option<SessionUser>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<SessionUser>().cloned()))
    }
}

/// Extractor that requires the workspace owner.
/// Returns 401 if unauthenticated, 403 for anyone else.
pub struct OwnerUser(pub SessionUser);

impl<S: Send + Sync> FromRequestParts<S> for OwnerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(session) = CurrentUser::from_request_parts(parts, state).await?;
        if !session.user.role.is_owner() {
            return Err(AppError::owner_only());
        }
        Ok(OwnerUser(session))
    }
}
