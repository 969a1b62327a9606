//! Operations that touch the store and an external service together.
//!
//! The store lock is always released before awaiting the sheet or Gemini.

use chrono::Utc;
use shared_types::{
    AppError, Bill, BillDraft, BillStatus, LoginRequest, LoginResponse, ReceiptAnalysis,
    SeoSuggestions,
};

use crate::gemini::GeminiClient;
use crate::sheet::LoginAudit;
use crate::state::AppState;

/// Sign in, audit the attempt to the sheet, and record the login position.
#[tracing::instrument(skip(state, req, user_agent), fields(email = %req.email))]
pub async fn login(state: &AppState, req: LoginRequest, user_agent: String) -> Result<LoginResponse, AppError> {
    let now = Utc::now();

    if let Some(sheet) = state.sheet.clone() {
        let audit = LoginAudit {
            email: req.email.trim().to_lowercase(),
            location: req.location,
            user_agent,
            at: now,
        };
        tokio::spawn(async move { sheet.log_login(&audit).await });
    }

    let mut wf = state.workforce.write().await;
    let (token, user) = wf.login(&req.email, req.password.as_deref())?;
    if let Some(loc) = req.location {
        if let Err(e) = wf.update_employee_location(&user.id, loc.lat, loc.lng, now) {
            tracing::warn!(error = %e.message, "Ignoring login position");
        }
    }
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "Signed in");
    Ok(LoginResponse { token, user })
}

/// Pull the sheet's bill list into the store. Returns whether it replaced anything.
#[tracing::instrument(skip(state))]
pub async fn refresh_bills(state: &AppState) -> bool {
    let Some(sheet) = &state.sheet else {
        return false;
    };
    let fetched = sheet.fetch_bills().await;
    let count = fetched.len();
    let replaced = state.workforce.write().await.replace_bills(fetched);
    if replaced {
        tracing::debug!(count, "Bills refreshed from sheet");
    }
    replaced
}

#[tracing::instrument(skip(state, draft))]
pub async fn submit_bill(state: &AppState, actor_id: &str, draft: BillDraft) -> Result<Bill, AppError> {
    let bill = state.workforce.write().await.submit_bill(actor_id, draft)?;
    if let Some(sheet) = &state.sheet {
        sheet.create_bill(&bill).await;
        refresh_bills(state).await;
    }
    Ok(bill)
}

#[tracing::instrument(skip(state))]
pub async fn update_bill_status(
    state: &AppState,
    actor_id: &str,
    bill_id: &str,
    status: BillStatus,
) -> Result<Bill, AppError> {
    let bill = state
        .workforce
        .write()
        .await
        .update_bill_status(actor_id, bill_id, status)?;
    if let Some(sheet) = &state.sheet {
        sheet.update_bill_status(&bill.id, status).await;
        refresh_bills(state).await;
    }
    Ok(bill)
}

fn gemini(state: &AppState) -> Result<&GeminiClient, AppError> {
    state
        .gemini
        .as_ref()
        .ok_or_else(|| AppError::upstream("AI features are not configured on this server."))
}

#[tracing::instrument(skip(state, image_base64))]
pub async fn analyze_receipt(state: &AppState, actor_id: &str, image_base64: &str) -> Result<ReceiptAnalysis, AppError> {
    state.workforce.read().await.actor(actor_id)?;
    if image_base64.trim().is_empty() {
        return Err(AppError::bad_request("Please upload a bill image first."));
    }
    gemini(state)?
        .analyze_bill_receipt(image_base64)
        .await
        .ok_or_else(|| AppError::upstream("Could not read the receipt. Please fill in the details manually."))
}

#[tracing::instrument(skip(state))]
pub async fn seo_suggestions(state: &AppState, actor_id: &str, keyword: &str) -> Result<SeoSuggestions, AppError> {
    state.workforce.read().await.actor(actor_id)?;
    Ok(gemini(state)?.generate_seo_suggestions(keyword.trim()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Workforce;
    use shared_types::{AppErrorKind, Coordinates, ShiftConfig};

    fn offline() -> AppState {
        AppState::new(Workforce::seeded(&ShiftConfig::default()).shared(), None, None)
    }

    #[tokio::test]
    async fn login_records_position() {
        let state = offline();
        let req = LoginRequest {
            email: "Sarah@Workforce.com".into(),
            password: None,
            location: Some(Coordinates { lat: 13.08, lng: 80.27 }),
        };
        let res = login(&state, req, "test".into()).await.unwrap();
        assert_eq!(res.user.id, "2");
        let loc = state.workforce.read().await.latest_location("2").unwrap();
        assert_eq!(loc.lat, 13.08);
    }

    #[tokio::test]
    async fn ai_without_client_is_upstream_error() {
        let state = offline();
        let err = seo_suggestions(&state, "2", "coffee").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Upstream);
    }

    #[tokio::test]
    async fn offline_bill_flow_stays_local() {
        let state = offline();
        let mut draft = BillDraft::new("2025-03-01");
        draft.image_url = "data:image/png;base64,AA".into();
        draft.amount = 120.0;
        let bill = submit_bill(&state, "2", draft).await.unwrap();
        let approved = update_bill_status(&state, "1", &bill.id, BillStatus::Approved).await.unwrap();
        assert_eq!(approved.status, BillStatus::Approved);
        assert!(!refresh_bills(&state).await);
    }
}
