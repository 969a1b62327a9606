use dioxus::prelude::*;
use shared_types::{Coordinates, ShiftRequest, ShiftRequestType};

#[cfg(feature = "server")]
use super::auth::{owner_session, session, workforce};
#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[server]
pub async fn request_shift_action(kind: ShiftRequestType) -> Result<ShiftRequest, ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .request_shift_action(s.id(), kind, chrono::Utc::now())
        .map(|r| r.redacted())
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn cancel_shift_request() -> Result<(), ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .cancel_shift_request(s.id())
        .map(|_| ())
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn deny_shift_request(request_id: String) -> Result<(), ServerFnError> {
    let s = owner_session().await?;
    workforce()
        .write()
        .await
        .deny_shift_request(s.id(), &request_id)
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn generate_shift_otp(request_id: String) -> Result<ShiftRequest, ServerFnError> {
    let s = owner_session().await?;
    workforce()
        .write()
        .await
        .generate_shift_otp(s.id(), &request_id, chrono::Utc::now())
        .map_err(|e| e.into_server_fn_error())
}

/// Returns the confirmation text on success.
#[server]
pub async fn confirm_shift_action(otp: String, location: Option<Coordinates>) -> Result<String, ServerFnError> {
    let s = session().await?;
    workforce()
        .write()
        .await
        .confirm_shift_action(s.id(), &otp, location, chrono::Utc::now())
        .map_err(|e| e.into_server_fn_error())
}
