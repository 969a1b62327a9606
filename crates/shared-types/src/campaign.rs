use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Draft,
    #[default]
    PendingApproval,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "DRAFT",
            CampaignStatus::PendingApproval => "PENDING_APPROVAL",
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Completed => "COMPLETED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::PendingApproval => "Pending Approval",
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
        }
    }

    /// The state the owner's play/pause control moves to.
    pub fn play_pause_target(&self) -> Self {
        match self {
            CampaignStatus::Active => CampaignStatus::Paused,
            _ => CampaignStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    Seo,
    Smm,
    #[default]
    Campaign,
}

impl CampaignType {
    pub const ALL: [CampaignType; 3] = [CampaignType::Seo, CampaignType::Smm, CampaignType::Campaign];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Seo => "SEO",
            CampaignType::Smm => "SMM",
            CampaignType::Campaign => "CAMPAIGN",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketingChannel {
    Whatsapp,
    Sms,
    Email,
    InApp,
}

impl MarketingChannel {
    pub const ALL: [MarketingChannel; 4] = [
        MarketingChannel::Whatsapp,
        MarketingChannel::Sms,
        MarketingChannel::Email,
        MarketingChannel::InApp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MarketingChannel::Whatsapp => "WhatsApp",
            MarketingChannel::Sms => "SMS",
            MarketingChannel::Email => "Email",
            MarketingChannel::InApp => "In-App",
        }
    }
}

/// Geographic focus of a campaign; `radius` is in kilometres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TargetLocation {
    pub label: String,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CampaignMetrics {
    pub reach: u64,
    pub engagement: u64,
    pub ctr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: CampaignType,
    pub status: CampaignStatus,
    pub assigned_to: Vec<String>,
    pub description: String,
    pub channels: Vec<MarketingChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<TargetLocation>,
    pub metrics: CampaignMetrics,
    pub created_at: DateTime<Utc>,
}

/// Default targeting radius offered by the form, in kilometres.
pub const DEFAULT_TARGET_RADIUS_KM: f64 = 5.0;

/// Form fields for a new campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Campaign title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: CampaignType,
    #[serde(default)]
    pub channels: Vec<MarketingChannel>,
    /// Blank means "no targeting".
    #[serde(default)]
    pub target_location_label: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Radius must be non-negative"))
    )]
    #[serde(default = "default_radius")]
    pub target_radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_TARGET_RADIUS_KM
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: CampaignType::Campaign,
            channels: Vec::new(),
            target_location_label: String::new(),
            target_radius: DEFAULT_TARGET_RADIUS_KM,
        }
    }
}

impl CampaignDraft {
    /// Add the channel if absent, remove it if present.
    pub fn toggle_channel(&mut self, channel: MarketingChannel) {
        if let Some(pos) = self.channels.iter().position(|c| *c == channel) {
            self.channels.remove(pos);
        } else {
            self.channels.push(channel);
        }
    }

    pub fn target_location(&self) -> Option<TargetLocation> {
        let label = self.target_location_label.trim();
        (!label.is_empty()).then(|| TargetLocation {
            label: label.to_string(),
            radius: self.target_radius,
        })
    }
}

/// Tabs on the campaigns page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignTab {
    #[default]
    All,
    Only(CampaignType),
}

impl CampaignTab {
    pub const ALL_TABS: [CampaignTab; 4] = [
        CampaignTab::All,
        CampaignTab::Only(CampaignType::Seo),
        CampaignTab::Only(CampaignType::Smm),
        CampaignTab::Only(CampaignType::Campaign),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CampaignTab::All => "ALL",
            CampaignTab::Only(kind) => kind.as_str(),
        }
    }

    pub fn filter<'a>(&self, campaigns: &'a [Campaign]) -> Vec<&'a Campaign> {
        campaigns
            .iter()
            .filter(|c| match self {
                CampaignTab::All => true,
                CampaignTab::Only(kind) => c.kind == *kind,
            })
            .collect()
    }
}

/// One AI-suggested SEO strategy point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SeoSuggestion {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SeoSuggestions {
    #[serde(default)]
    pub suggestions: Vec<SeoSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn campaign(id: &str, kind: CampaignType) -> Campaign {
        Campaign {
            id: id.into(),
            title: format!("c-{id}"),
            kind,
            status: CampaignStatus::Active,
            assigned_to: vec!["1".into()],
            description: String::new(),
            channels: vec![],
            target_location: None,
            metrics: CampaignMetrics::default(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn tab_filters_by_type() {
        let all = vec![
            campaign("a", CampaignType::Seo),
            campaign("b", CampaignType::Smm),
            campaign("c", CampaignType::Seo),
        ];
        assert_eq!(CampaignTab::All.filter(&all).len(), 3);
        let seo = CampaignTab::Only(CampaignType::Seo).filter(&all);
        assert_eq!(seo.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(CampaignTab::Only(CampaignType::Campaign).filter(&all).is_empty());
    }

    #[test]
    fn channel_toggle_adds_then_removes() {
        let mut draft = CampaignDraft::default();
        draft.toggle_channel(MarketingChannel::Sms);
        draft.toggle_channel(MarketingChannel::Email);
        draft.toggle_channel(MarketingChannel::Sms);
        assert_eq!(draft.channels, vec![MarketingChannel::Email]);
    }

    #[test]
    fn blank_label_means_no_target() {
        let mut draft = CampaignDraft::default();
        assert!(draft.target_location().is_none());
        draft.target_location_label = "  Chennai ".into();
        assert_eq!(
            draft.target_location(),
            Some(TargetLocation { label: "Chennai".into(), radius: 5.0 })
        );
    }

    #[test]
    fn wire_names_match_sheet_conventions() {
        let json = serde_json::to_value(campaign("a", CampaignType::Smm)).unwrap();
        assert_eq!(json["type"], "SMM");
        assert_eq!(json["assignedTo"][0], "1");
        assert_eq!(
            serde_json::to_value(CampaignStatus::PendingApproval).unwrap(),
            "PENDING_APPROVAL"
        );
        assert_eq!(serde_json::to_value(MarketingChannel::InApp).unwrap(), "IN_APP");
    }

    #[test]
    fn play_pause_flips_only_active() {
        assert_eq!(CampaignStatus::Active.play_pause_target(), CampaignStatus::Paused);
        assert_eq!(CampaignStatus::Paused.play_pause_target(), CampaignStatus::Active);
        assert_eq!(CampaignStatus::PendingApproval.play_pause_target(), CampaignStatus::Active);
    }

    #[test]
    fn draft_defaults_radius_when_missing() {
        let draft: CampaignDraft = serde_json::from_str(r#"{"title":"Launch"}"#).unwrap();
        assert_eq!(draft.target_radius, DEFAULT_TARGET_RADIUS_KM);
        assert_eq!(draft.kind, CampaignType::Campaign);
    }
}
