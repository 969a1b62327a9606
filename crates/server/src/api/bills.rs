use dioxus::prelude::*;
use shared_types::{Bill, BillDraft, BillStatus, ReceiptAnalysis};

#[cfg(feature = "server")]
use super::auth::{owner_session, session};
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[server]
pub async fn submit_bill(draft: BillDraft) -> Result<Bill, ServerFnError> {
    let s = session().await?;
    draft.validate_request().map_err(|e| e.into_server_fn_error())?;
    crate::service::submit_bill(crate::state::get_state(), s.id(), draft)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn update_bill_status(bill_id: String, status: BillStatus) -> Result<Bill, ServerFnError> {
    let s = owner_session().await?;
    crate::service::update_bill_status(crate::state::get_state(), s.id(), &bill_id, status)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// AI read-out of a receipt photo, sent as a data URL or bare base64.
#[server]
pub async fn analyze_receipt(image: String) -> Result<ReceiptAnalysis, ServerFnError> {
    let s = session().await?;
    crate::service::analyze_receipt(crate::state::get_state(), s.id(), &image)
        .await
        .map_err(|e| e.into_server_fn_error())
}
