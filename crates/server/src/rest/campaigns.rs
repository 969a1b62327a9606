use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared_types::{
    AppError, Campaign, CampaignDraft, SeoRequest, SeoSuggestions, UpdateCampaignStatusRequest,
};

use crate::auth::extractors::{CurrentUser, OwnerUser};
use crate::error_convert::ValidateRequest;
use crate::service;
use crate::state::AppState;
use crate::store::SharedWorkforce;

#[utoipa::path(
    get,
    path = "/api/campaigns",
    responses(
        (status = 200, description = "All campaigns, newest first", body = Vec<Campaign>)
    ),
    tag = "campaigns"
)]
pub async fn list_campaigns(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(_user): CurrentUser,
) -> Json<Vec<Campaign>> {
    Json(workforce.read().await.campaigns().to_vec())
}

/// Launch a campaign (owner) or propose one for approval (employee).
#[utoipa::path(
    post,
    path = "/api/campaigns",
    request_body = CampaignDraft,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Title missing", body = AppError)
    ),
    tag = "campaigns"
)]
pub async fn add_campaign(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<CampaignDraft>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    body.validate_request()?;
    let campaign = workforce
        .write()
        .await
        .add_campaign(session.id(), body, Utc::now())?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Approve, pause or resume a campaign.
#[utoipa::path(
    patch,
    path = "/api/campaigns/{id}/status",
    params(("id" = String, Path, description = "Campaign id")),
    request_body = UpdateCampaignStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = Campaign),
        (status = 403, description = "Owner only", body = AppError),
        (status = 404, description = "No such campaign", body = AppError)
    ),
    tag = "campaigns"
)]
pub async fn update_campaign_status(
    State(workforce): State<SharedWorkforce>,
    OwnerUser(session): OwnerUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateCampaignStatusRequest>,
) -> Result<Json<Campaign>, AppError> {
    let campaign = workforce
        .write()
        .await
        .update_campaign_status(session.id(), &id, body.status)?;
    Ok(Json(campaign))
}

/// Five AI-generated SEO strategy points for a keyword.
#[utoipa::path(
    post,
    path = "/api/campaigns/seo",
    request_body = SeoRequest,
    responses(
        (status = 200, description = "Suggestions, empty if the model failed", body = SeoSuggestions),
        (status = 502, description = "AI not configured", body = AppError)
    ),
    tag = "campaigns"
)]
pub async fn seo_suggestions(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<SeoRequest>,
) -> Result<Json<SeoSuggestions>, AppError> {
    body.validate_request()?;
    let suggestions = service::seo_suggestions(&state, session.id(), &body.keyword).await?;
    Ok(Json(suggestions))
}
