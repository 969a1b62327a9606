use axum::{extract::State, Json};
use chrono::Utc;
use shared_types::{
    AppError, Coordinates, LiveLocation, LocationRecord, SharingRequest, SharingResponse,
};

use crate::auth::extractors::CurrentUser;
use crate::store::SharedWorkforce;

/// Latest known positions the caller may see.
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Live positions, newest first", body = Vec<LiveLocation>)
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> Json<Vec<LiveLocation>> {
    Json(workforce.read().await.live_locations(&session.user))
}

/// Report the caller's current position.
#[utoipa::path(
    put,
    path = "/api/locations/me",
    request_body = Coordinates,
    responses(
        (status = 200, description = "Position stored", body = LocationRecord),
        (status = 400, description = "Coordinates out of range", body = AppError)
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<Coordinates>,
) -> Result<Json<LocationRecord>, AppError> {
    let record = workforce
        .write()
        .await
        .update_employee_location(session.id(), body.lat, body.lng, Utc::now())?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/api/locations/sharing",
    request_body = SharingRequest,
    responses(
        (status = 200, description = "New sharing state", body = SharingResponse)
    ),
    tag = "locations"
)]
pub async fn set_sharing(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<SharingRequest>,
) -> Result<Json<SharingResponse>, AppError> {
    let sharing = workforce
        .write()
        .await
        .set_location_sharing(session.id(), body.enabled)?;
    Ok(Json(SharingResponse { sharing }))
}

#[utoipa::path(
    post,
    path = "/api/locations/sharing/toggle",
    responses(
        (status = 200, description = "New sharing state", body = SharingResponse)
    ),
    tag = "locations"
)]
pub async fn toggle_sharing(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<SharingResponse>, AppError> {
    let sharing = workforce.write().await.toggle_location_sharing(session.id())?;
    Ok(Json(SharingResponse { sharing }))
}
