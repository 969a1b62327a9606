use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    scope_bills, AnalyzeReceiptRequest, AppError, Bill, BillDraft, BillFilter, ReceiptAnalysis,
    UpdateBillStatusRequest,
};

use crate::auth::extractors::{CurrentUser, OwnerUser};
use crate::error_convert::ValidateRequest;
use crate::service;
use crate::state::AppState;
use crate::store::SharedWorkforce;

// ---------------------------------------------------------------------------
// GET /api/bills
// ---------------------------------------------------------------------------

/// Bills visible to the caller, narrowed by the optional filters.
#[utoipa::path(
    get,
    path = "/api/bills",
    params(BillFilter),
    responses(
        (status = 200, description = "Matching bills, newest first", body = Vec<Bill>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "bills"
)]
pub async fn list_bills(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Query(filter): Query<BillFilter>,
) -> Json<Vec<Bill>> {
    let visible = scope_bills(workforce.read().await.bills(), &session.user);
    Json(filter.apply(&visible))
}

// ---------------------------------------------------------------------------
// POST /api/bills
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/bills",
    request_body = BillDraft,
    responses(
        (status = 201, description = "Claim submitted as pending", body = Bill),
        (status = 400, description = "Receipt image missing", body = AppError),
        (status = 422, description = "Invalid fields", body = AppError)
    ),
    tag = "bills"
)]
pub async fn submit_bill(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<BillDraft>,
) -> Result<(StatusCode, Json<Bill>), AppError> {
    body.validate_request()?;
    let bill = service::submit_bill(&state, session.id(), body).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

// ---------------------------------------------------------------------------
// PATCH /api/bills/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/bills/{id}/status",
    params(("id" = String, Path, description = "Bill id")),
    request_body = UpdateBillStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = Bill),
        (status = 403, description = "Owner only", body = AppError),
        (status = 404, description = "No such bill", body = AppError)
    ),
    tag = "bills"
)]
pub async fn update_bill_status(
    State(state): State<AppState>,
    OwnerUser(session): OwnerUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateBillStatusRequest>,
) -> Result<Json<Bill>, AppError> {
    let bill = service::update_bill_status(&state, session.id(), &id, body.status).await?;
    Ok(Json(bill))
}

// ---------------------------------------------------------------------------
// POST /api/bills/analyze
// ---------------------------------------------------------------------------

/// Read date, amount and category off a receipt photo.
#[utoipa::path(
    post,
    path = "/api/bills/analyze",
    request_body = AnalyzeReceiptRequest,
    responses(
        (status = 200, description = "Extracted fields", body = ReceiptAnalysis),
        (status = 502, description = "AI unavailable or unreadable receipt", body = AppError)
    ),
    tag = "bills"
)]
pub async fn analyze_receipt(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<AnalyzeReceiptRequest>,
) -> Result<Json<ReceiptAnalysis>, AppError> {
    let analysis = service::analyze_receipt(&state, session.id(), &body.image_base64).await?;
    Ok(Json(analysis))
}
