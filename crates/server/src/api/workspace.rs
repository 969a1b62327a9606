use dioxus::prelude::*;
use shared_types::{LocationRecord, WorkspaceSnapshot};

#[cfg(feature = "server")]
use super::auth::{session, workforce};
#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// The role-filtered view the UI renders from.
#[server]
pub async fn get_snapshot() -> Result<WorkspaceSnapshot, ServerFnError> {
    let s = session().await?;
    workforce()
        .read()
        .await
        .snapshot(s.id(), chrono::Utc::now())
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn update_location(lat: f64, lng: f64) -> Result<LocationRecord, ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .update_employee_location(s.id(), lat, lng, chrono::Utc::now())
        .map_err(|e| e.into_server_fn_error())
}

/// Flip location sharing. Returns the new state.
#[server]
pub async fn toggle_location_sharing() -> Result<bool, ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .toggle_location_sharing(s.id())
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn set_location_sharing(enabled: bool) -> Result<bool, ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .set_location_sharing(s.id(), enabled)
        .map_err(|e| e.into_server_fn_error())
}
