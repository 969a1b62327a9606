use chrono::{DateTime, Utc};
use shared_types::{AppError, Campaign, CampaignDraft, CampaignMetrics, CampaignStatus};

use super::{new_id, Workforce};

impl Workforce {
    /// Create a campaign owned by the actor. Owner campaigns go live
    /// immediately; employee proposals wait for approval.
    pub fn add_campaign(
        &mut self,
        actor_id: &str,
        draft: CampaignDraft,
        now: DateTime<Utc>,
    ) -> Result<Campaign, AppError> {
        let actor = self.actor(actor_id)?;
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request("Campaign title is required"));
        }
        let campaign = Campaign {
            id: new_id(),
            title: title.to_string(),
            kind: draft.kind,
            status: if actor.role.is_owner() {
                CampaignStatus::Active
            } else {
                CampaignStatus::PendingApproval
            },
            assigned_to: vec![actor.id.clone()],
            target_location: draft.target_location(),
            description: draft.description,
            channels: draft.channels,
            metrics: CampaignMetrics::default(),
            created_at: now,
        };
        self.campaigns.insert(0, campaign.clone());
        Ok(campaign)
    }

    pub fn update_campaign_status(
        &mut self,
        actor_id: &str,
        campaign_id: &str,
        status: CampaignStatus,
    ) -> Result<Campaign, AppError> {
        self.owner(actor_id)?;
        let campaign = self
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign_id)
            .ok_or_else(|| AppError::not_found("Campaign not found"))?;
        campaign.status = status;
        Ok(campaign.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use shared_types::{AppErrorKind, CampaignType, MarketingChannel};

    fn draft(title: &str) -> CampaignDraft {
        CampaignDraft {
            title: title.into(),
            kind: CampaignType::Smm,
            channels: vec![MarketingChannel::Whatsapp],
            target_location_label: "Coimbatore".into(),
            ..Default::default()
        }
    }

    #[test]
    fn status_depends_on_creator_role() {
        let mut wf = workforce();
        let mine = wf.add_campaign(OWNER, draft("Diwali push"), t0()).unwrap();
        let proposal = wf.add_campaign(SARAH, draft("Reels series"), t0()).unwrap();
        assert_eq!(mine.status, CampaignStatus::Active);
        assert_eq!(proposal.status, CampaignStatus::PendingApproval);
        assert_eq!(proposal.assigned_to, vec![SARAH.to_string()]);
        assert_eq!(proposal.metrics, CampaignMetrics::default());
        assert_eq!(proposal.target_location.as_ref().unwrap().radius, 5.0);
        assert_eq!(wf.campaigns()[0].id, proposal.id);
    }

    #[test]
    fn owner_approves_and_pauses() {
        let mut wf = workforce();
        let proposal = wf.add_campaign(SARAH, draft("Reels"), t0()).unwrap();
        assert_eq!(
            wf.update_campaign_status(SARAH, &proposal.id, CampaignStatus::Active).unwrap_err().kind,
            AppErrorKind::Forbidden
        );
        let live = wf.update_campaign_status(OWNER, &proposal.id, CampaignStatus::Active).unwrap();
        assert_eq!(live.status, CampaignStatus::Active);
        let paused = wf
            .update_campaign_status(OWNER, &proposal.id, live.status.play_pause_target())
            .unwrap();
        assert_eq!(paused.status, CampaignStatus::Paused);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut wf = workforce();
        assert!(wf.add_campaign(OWNER, draft("   "), t0()).is_err());
    }
}
