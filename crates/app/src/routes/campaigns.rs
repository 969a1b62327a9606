use std::collections::BTreeSet;

use crate::auth::use_is_owner;
use crate::format_helpers::{format_day, format_screaming_title};
use crate::live::use_workspace;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdArrowUpRight, LdChartColumn, LdCircleCheck, LdMail, LdMapPin, LdMegaphone,
    LdMessageSquare, LdPause, LdPlay, LdPlus, LdSearch, LdShare2, LdSmartphone, LdTarget,
    LdUsers, LdWandSparkles,
};
use dioxus_free_icons::Icon;
use shared_types::{
    AppError, Campaign, CampaignDraft, CampaignStatus, CampaignTab, CampaignType,
    MarketingChannel, SeoSuggestion,
};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input,
    Modal, PageActions, PageHeader, PageSubtitle, PageTitle, StatCard,
};

/// Headline numbers across every visible campaign.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct CampaignTotals {
    reach: u64,
    /// Engagement as a percentage of reach.
    engagement_rate: f64,
    avg_ctr: f64,
    active_channels: usize,
}

impl CampaignTotals {
    fn compute(campaigns: &[Campaign]) -> Self {
        if campaigns.is_empty() {
            return Self::default();
        }
        let reach: u64 = campaigns.iter().map(|c| c.metrics.reach).sum();
        let engagement: u64 = campaigns.iter().map(|c| c.metrics.engagement).sum();
        let channels: BTreeSet<&str> = campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .flat_map(|c| c.channels.iter().map(|ch| ch.label()))
            .collect();
        Self {
            reach,
            engagement_rate: if reach == 0 {
                0.0
            } else {
                engagement as f64 * 100.0 / reach as f64
            },
            avg_ctr: campaigns.iter().map(|c| c.metrics.ctr).sum::<f64>() / campaigns.len() as f64,
            active_channels: channels.len(),
        }
    }
}

/// "24.8k" style compact count.
fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}k", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}

/// Engagement summed per channel, in channel order.
fn channel_engagement(campaigns: &[Campaign]) -> Vec<(MarketingChannel, u64)> {
    MarketingChannel::ALL
        .iter()
        .map(|channel| {
            let total = campaigns
                .iter()
                .filter(|c| c.channels.contains(channel))
                .map(|c| c.metrics.engagement)
                .sum();
            (*channel, total)
        })
        .collect()
}

fn status_badge(status: CampaignStatus) -> BadgeVariant {
    match status {
        CampaignStatus::Active => BadgeVariant::Success,
        CampaignStatus::Paused => BadgeVariant::Warning,
        CampaignStatus::PendingApproval => BadgeVariant::Primary,
        CampaignStatus::Draft | CampaignStatus::Completed => BadgeVariant::Outline,
    }
}

fn kind_icon(kind: CampaignType) -> Element {
    match kind {
        CampaignType::Seo => rsx! { Icon::<LdSearch> { icon: LdSearch, width: 20, height: 20 } },
        CampaignType::Smm => rsx! { Icon::<LdShare2> { icon: LdShare2, width: 20, height: 20 } },
        CampaignType::Campaign => rsx! { Icon::<LdMegaphone> { icon: LdMegaphone, width: 20, height: 20 } },
    }
}

fn channel_icon(channel: MarketingChannel) -> Element {
    match channel {
        MarketingChannel::Whatsapp => rsx! { Icon::<LdMessageSquare> { icon: LdMessageSquare, width: 14, height: 14 } },
        MarketingChannel::Email => rsx! { Icon::<LdMail> { icon: LdMail, width: 14, height: 14 } },
        MarketingChannel::Sms => rsx! { Icon::<LdSmartphone> { icon: LdSmartphone, width: 14, height: 14 } },
        MarketingChannel::InApp => rsx! { Icon::<LdTarget> { icon: LdTarget, width: 14, height: 14 } },
    }
}

/// Marketing suite: campaign cards by type, owner approval controls, the
/// channel mix and the SEO assistant.
#[component]
pub fn Campaigns() -> Element {
    let workspace = use_workspace();
    let is_owner = use_is_owner();
    let mut tab = use_signal(CampaignTab::default);
    let mut creating = use_signal(|| false);
    let mut banner = use_signal(|| Option::<String>::None);

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    let totals = CampaignTotals::compute(&snap.campaigns);
    let mix = channel_engagement(&snap.campaigns);
    let peak = mix.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    let shown: Vec<Campaign> = tab().filter(&snap.campaigns).into_iter().cloned().collect();

    let set_status = move |campaign_id: String, status: CampaignStatus| {
        spawn(async move {
            match server::api::update_campaign_status(campaign_id, status).await {
                Ok(c) => {
                    tracing::info!(campaign_id = %c.id, status = c.status.as_str(), "Campaign status changed");
                    let _ = workspace.reload().await;
                }
                Err(e) => banner.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        PageHeader {
            div {
                PageTitle { "Marketing Suite" }
                PageSubtitle { "Location-aware campaigns and multi-channel orchestration." }
            }
            PageActions {
                Button { onclick: move |_| creating.set(true),
                    Icon::<LdPlus> { icon: LdPlus, width: 18, height: 18 }
                    "New Campaign"
                }
            }
        }

        if let Some(message) = banner() {
            p { class: "banner banner-error", role: "alert", "{message}" }
        }

        div { class: "stat-grid",
            StatCard { label: "Total Reach", value: compact_count(totals.reach),
                Icon::<LdUsers> { icon: LdUsers, width: 22, height: 22 }
            }
            StatCard { label: "Engagement Rate", value: format!("{:.1}%", totals.engagement_rate),
                Icon::<LdTarget> { icon: LdTarget, width: 22, height: 22 }
            }
            StatCard { label: "Avg. CTR", value: format!("{:.1}%", totals.avg_ctr),
                Icon::<LdArrowUpRight> { icon: LdArrowUpRight, width: 22, height: 22 }
            }
            StatCard { label: "Active Channels", value: totals.active_channels.to_string(),
                Icon::<LdMegaphone> { icon: LdMegaphone, width: 22, height: 22 }
            }
        }

        div { class: "campaigns-layout",
            div { class: "campaigns-main",
                div { class: "tab-strip",
                    for t in CampaignTab::ALL_TABS {
                        button {
                            key: "{t.label()}",
                            class: if tab() == t { "tab active" } else { "tab" },
                            onclick: move |_| tab.set(t),
                            {t.label()}
                        }
                    }
                }

                if shown.is_empty() {
                    div { class: "empty-state", p { "No campaigns in this view yet." } }
                }

                div { class: "campaign-grid",
                    for campaign in shown {
                        CampaignCard {
                            key: "{campaign.id}",
                            campaign: campaign.clone(),
                            is_owner,
                            on_status: move |(id, status): (String, CampaignStatus)| set_status(id, status),
                        }
                    }
                }
            }

            aside { class: "campaigns-side",
                Card {
                    CardHeader {
                        CardTitle {
                            Icon::<LdChartColumn> { icon: LdChartColumn, width: 18, height: 18 }
                            "Channel Impact"
                        }
                    }
                    CardContent {
                        div { class: "bar-list",
                            for (channel, engagement) in mix {
                                div { key: "{channel.label()}", class: "bar-row",
                                    span { class: "bar-label", {channel.label()} }
                                    div { class: "bar-track",
                                        div {
                                            class: "bar-fill",
                                            "data-channel": "{channel.label()}",
                                            style: format!("width: {}%", engagement * 100 / peak),
                                        }
                                    }
                                    span { class: "bar-value", {compact_count(engagement)} }
                                }
                            }
                        }
                    }
                }

                SeoLab {}
            }
        }

        NewCampaignModal {
            open: creating(),
            on_close: move |_| creating.set(false),
        }
    }
}

#[component]
fn CampaignCard(
    campaign: Campaign,
    is_owner: bool,
    on_status: EventHandler<(String, CampaignStatus)>,
) -> Element {
    let approve_id = campaign.id.clone();
    let toggle_id = campaign.id.clone();
    let toggle_target = campaign.status.play_pause_target();

    rsx! {
        Card { class: "campaign-card", "data-status": campaign.status.as_str(),
            CardContent {
                div { class: "campaign-card-head",
                    span { class: "campaign-kind", "data-kind": campaign.kind.as_str(), {kind_icon(campaign.kind)} }
                    div { class: "campaign-card-meta",
                        Badge { variant: status_badge(campaign.status), {format_screaming_title(campaign.status.as_str())} }
                        p { class: "row-caption", "Created " {format_day(&campaign.created_at)} }
                    }
                }
                h3 { "{campaign.title}" }
                p { class: "campaign-description", "{campaign.description}" }

                if let Some(target) = campaign.target_location.as_ref() {
                    p { class: "campaign-target",
                        Icon::<LdMapPin> { icon: LdMapPin, width: 14, height: 14 }
                        "Target: {target.label} ({target.radius}km)"
                    }
                }

                div { class: "channel-chips",
                    for channel in campaign.channels.iter().copied() {
                        span { key: "{channel.label()}", class: "channel-chip", title: channel.label(),
                            {channel_icon(channel)}
                        }
                    }
                }

                div { class: "campaign-metrics",
                    div {
                        p { class: "strong", "{campaign.metrics.reach}" }
                        p { class: "row-caption", "Reach" }
                    }
                    div {
                        p { class: "strong", "{campaign.metrics.engagement}" }
                        p { class: "row-caption", "Engagement" }
                    }
                    div {
                        p { class: "strong", "{campaign.metrics.ctr}%" }
                        p { class: "row-caption", "CTR" }
                    }
                }

                if is_owner {
                    div { class: "campaign-actions",
                        if campaign.status == CampaignStatus::PendingApproval {
                            Button {
                                variant: ButtonVariant::Success,
                                onclick: move |_| on_status.call((approve_id.clone(), CampaignStatus::Active)),
                                Icon::<LdCircleCheck> { icon: LdCircleCheck, width: 16, height: 16 }
                                "Approve"
                            }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| on_status.call((toggle_id.clone(), toggle_target)),
                            if campaign.status == CampaignStatus::Active {
                                Icon::<LdPause> { icon: LdPause, width: 16, height: 16 }
                                "Pause"
                            } else {
                                Icon::<LdPlay> { icon: LdPlay, width: 16, height: 16 }
                                "Activate"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Keyword in, AI-suggested SEO strategy points out.
#[component]
fn SeoLab() -> Element {
    let mut keyword = use_signal(String::new);
    let mut results = use_signal(Vec::<SeoSuggestion>::new);
    let mut generating = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let generate = move |_| async move {
        let term = keyword().trim().to_string();
        if term.is_empty() {
            return;
        }
        generating.set(true);
        error.set(None);
        match server::api::seo_suggestions(term).await {
            Ok(out) => results.set(out.suggestions),
            Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
        }
        generating.set(false);
    };

    rsx! {
        Card { class: "seo-lab",
            CardHeader {
                CardTitle {
                    Icon::<LdWandSparkles> { icon: LdWandSparkles, width: 20, height: 20 }
                    "SEO Lab"
                }
            }
            CardContent {
                p { class: "muted", "AI keyword analysis for location-based search intent." }
                Input {
                    placeholder: "e.g. Services in Downtown",
                    value: keyword(),
                    on_input: move |e: FormEvent| keyword.set(e.value()),
                }
                Button {
                    disabled: generating() || keyword().trim().is_empty(),
                    onclick: generate,
                    if generating() { "Analyzing..." } else { "Generate Strategy" }
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                ul { class: "seo-results",
                    for (i, s) in results().into_iter().enumerate() {
                        li { key: "{i}",
                            p { class: "strong", "{s.title}" }
                            p { class: "muted", "{s.description}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NewCampaignModal(open: bool, on_close: EventHandler<()>) -> Element {
    let workspace = use_workspace();
    let is_owner = use_is_owner();
    let mut draft = use_signal(CampaignDraft::default);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        error.set(None);
        match server::api::add_campaign(draft()).await {
            Ok(c) => {
                tracing::info!(campaign_id = %c.id, status = c.status.as_str(), "Campaign created");
                draft.set(CampaignDraft::default());
                let _ = workspace.reload().await;
                on_close.call(());
            }
            Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
        }
        saving.set(false);
    };

    let current = draft();

    rsx! {
        Modal {
            open,
            title: "New Campaign".to_string(),
            on_close: move |_| on_close.call(()),
            form { class: "campaign-form", onsubmit: handle_submit,
                Input {
                    label: "Title",
                    value: current.title.clone(),
                    on_input: move |e: FormEvent| draft.write().title = e.value(),
                }

                label { class: "field-label", "Type" }
                div { class: "tab-strip",
                    for kind in CampaignType::ALL {
                        button {
                            key: "{kind.as_str()}",
                            r#type: "button",
                            class: if current.kind == kind { "tab active" } else { "tab" },
                            onclick: move |_| draft.write().kind = kind,
                            {kind.as_str()}
                        }
                    }
                }

                label { class: "field-label", "Description" }
                textarea {
                    class: "textarea",
                    rows: 3,
                    value: "{current.description}",
                    oninput: move |e: FormEvent| draft.write().description = e.value(),
                }

                label { class: "field-label", "Channels" }
                div { class: "channel-toggles",
                    for channel in MarketingChannel::ALL {
                        button {
                            key: "{channel.label()}",
                            r#type: "button",
                            class: if current.channels.contains(&channel) { "channel-toggle active" } else { "channel-toggle" },
                            onclick: move |_| draft.write().toggle_channel(channel),
                            {channel_icon(channel)}
                            {channel.label()}
                        }
                    }
                }

                div { class: "form-row",
                    Input {
                        label: "Target location",
                        placeholder: "e.g. City Center",
                        value: current.target_location_label.clone(),
                        on_input: move |e: FormEvent| draft.write().target_location_label = e.value(),
                    }
                    Input {
                        label: "Radius (km)",
                        input_type: "number",
                        value: current.target_radius.to_string(),
                        on_input: move |e: FormEvent| {
                            if let Ok(r) = e.value().parse::<f64>() {
                                draft.write().target_radius = r;
                            }
                        },
                    }
                }

                if !is_owner {
                    p { class: "muted", "New campaigns wait for owner approval before going live." }
                }

                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }

                Button { submit: true, disabled: saving() || current.title.trim().is_empty(),
                    if saving() { "Saving..." } else { "Launch Campaign" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared_types::CampaignMetrics;

    fn campaign(status: CampaignStatus, channels: Vec<MarketingChannel>, reach: u64, engagement: u64, ctr: f64) -> Campaign {
        Campaign {
            id: "c".into(),
            title: "Launch".into(),
            kind: CampaignType::Campaign,
            status,
            assigned_to: vec![],
            description: String::new(),
            channels,
            target_location: None,
            metrics: CampaignMetrics { reach, engagement, ctr },
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn totals_span_every_campaign() {
        let list = vec![
            campaign(CampaignStatus::Active, vec![MarketingChannel::Sms, MarketingChannel::Email], 1_000, 100, 2.0),
            campaign(CampaignStatus::Paused, vec![MarketingChannel::Whatsapp], 3_000, 300, 4.0),
        ];
        let totals = CampaignTotals::compute(&list);
        assert_eq!(totals.reach, 4_000);
        assert_eq!(totals.engagement_rate, 10.0);
        assert_eq!(totals.avg_ctr, 3.0);
        assert_eq!(totals.active_channels, 2);
        assert_eq!(CampaignTotals::compute(&[]), CampaignTotals::default());
    }

    #[test]
    fn channel_mix_sums_engagement() {
        let list = vec![
            campaign(CampaignStatus::Active, vec![MarketingChannel::Sms], 10, 5, 0.0),
            campaign(CampaignStatus::Active, vec![MarketingChannel::Sms, MarketingChannel::Email], 10, 7, 0.0),
        ];
        let mix = channel_engagement(&list);
        assert_eq!(mix[0], (MarketingChannel::Whatsapp, 0));
        assert_eq!(mix[1], (MarketingChannel::Sms, 12));
        assert_eq!(mix[2], (MarketingChannel::Email, 7));
    }

    #[test]
    fn compact_counts() {
        assert_eq!(compact_count(950), "950");
        assert_eq!(compact_count(24_800), "24.8k");
        assert_eq!(compact_count(2_500_000), "2.5M");
    }
}
