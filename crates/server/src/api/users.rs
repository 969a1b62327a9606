use dioxus::prelude::*;
use shared_types::{NewEmployeeRequest, User, UserStatus};

#[cfg(feature = "server")]
use super::auth::{owner_session, workforce};
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[server]
pub async fn add_employee(req: NewEmployeeRequest) -> Result<User, ServerFnError> {
    let s = owner_session().await?;
    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    workforce()
        .write()
        .await
        .add_employee(s.id(), req)
        .map_err(|e| e.into_server_fn_error())
}

/// Grant or deny a member's access.
#[server]
pub async fn set_user_status(user_id: String, status: UserStatus) -> Result<User, ServerFnError> {
    let s = owner_session().await?;
    workforce()
        .write()
        .await
        .toggle_user_status(s.id(), &user_id, status)
        .map_err(|e| e.into_server_fn_error())
}
