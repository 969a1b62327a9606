use dioxus::prelude::*;
use shared_types::{Campaign, CampaignDraft, CampaignStatus, SeoSuggestions};

#[cfg(feature = "server")]
use super::auth::{owner_session, session, workforce};
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[server]
pub async fn add_campaign(draft: CampaignDraft) -> Result<Campaign, ServerFnError> {
    let s = session().await?;
    draft.validate_request().map_err(|e| e.into_server_fn_error())?;
    workforce()
        .write()
        .await
        .add_campaign(s.id(), draft, chrono::Utc::now())
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn update_campaign_status(campaign_id: String, status: CampaignStatus) -> Result<Campaign, ServerFnError> {
    let s = owner_session().await?;
    workforce()
        .write()
        .await
        .update_campaign_status(s.id(), &campaign_id, status)
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn seo_suggestions(keyword: String) -> Result<SeoSuggestions, ServerFnError> {
    use shared_types::SeoRequest;

    let s = session().await?;
    let req = SeoRequest { keyword };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    crate::service::seo_suggestions(crate::state::get_state(), s.id(), &req.keyword)
        .await
        .map_err(|e| e.into_server_fn_error())
}
