use crate::auth::use_is_owner;
use crate::browser;
use crate::format_helpers::{
    decode_query_value, format_coordinates, format_time, maps_link, whatsapp_share_url,
};
use crate::i18n::use_strings;
use crate::live::use_workspace;
use crate::routes::employee::SessionTable;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCopy, LdMapPin, LdNavigation};
use dioxus_free_icons::Icon;
use shared_types::{attendance_history, LiveLocation, WorkspaceSnapshot};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Modal, PageActions, PageHeader, PageSubtitle, PageTitle,
};

const SHARE_MESSAGE: &str = "Professional Location Update:";

/// A point the page was asked to focus on via `?lat=&lng=&name=`.
#[derive(Debug, Clone, PartialEq)]
struct FocusPoint {
    lat: f64,
    lng: f64,
    name: Option<String>,
}

impl FocusPoint {
    /// Both coordinates must parse; the name is optional and arrives
    /// percent-encoded.
    fn from_query(lat: Option<&str>, lng: Option<&str>, name: Option<&str>) -> Option<Self> {
        let lat = lat?.trim().parse::<f64>().ok()?;
        let lng = lng?.trim().parse::<f64>().ok()?;
        Some(Self {
            lat,
            lng,
            name: name.map(decode_query_value).filter(|n| !n.is_empty()),
        })
    }
}

/// Markers the viewer may see: the owner sees everyone, others only
/// themselves.
fn visible_locations(snap: &WorkspaceSnapshot) -> Vec<LiveLocation> {
    snap.locations
        .iter()
        .filter(|l| snap.me.role.is_owner() || l.user_id == snap.me.id)
        .cloned()
        .collect()
}

/// Fleet tracking for the owner, personal telemetry for employees.
#[component]
pub fn Location(lat: Option<String>, lng: Option<String>, name: Option<String>) -> Element {
    let workspace = use_workspace();
    let is_owner = use_is_owner();
    let text = use_strings();
    let mut share_target = use_signal(|| Option::<(f64, f64)>::None);

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    let focus = FocusPoint::from_query(lat.as_deref(), lng.as_deref(), name.as_deref());
    let markers = visible_locations(&snap);
    let history = attendance_history(&snap.attendance, &snap.me);

    // Focus point first, then the viewer's own fix, then anyone visible.
    let center = focus
        .as_ref()
        .map(|f| (f.lat, f.lng))
        .or_else(|| snap.my_location().map(|l| (l.lat, l.lng)))
        .or_else(|| markers.first().map(|m| (m.location.lat, m.location.lng)));

    rsx! {
        PageHeader {
            div {
                PageTitle {
                    if is_owner { {text.location.fleet_tracking} } else { {text.location.location_dashboard} }
                }
                PageSubtitle {
                    if is_owner { {text.location.admin_sub} } else { {text.location.emp_sub} }
                }
            }
            PageActions {
                div { class: "header-stat",
                    if is_owner {
                        span { class: "header-stat-label", {text.location.online_personnel} }
                        span { class: "header-stat-value", "{markers.len()}" }
                    } else {
                        span { class: "header-stat-value", {text.location.syncing_live} }
                    }
                    Icon::<LdNavigation> { icon: LdNavigation, width: 20, height: 20 }
                }
            }
        }

        Card { class: "map-card",
            match center {
                Some((lat, lng)) => rsx! {
                    div { class: "map-center",
                        Icon::<LdMapPin> { icon: LdMapPin, width: 28, height: 28 }
                        p { class: "map-coordinates", {format_coordinates(lat, lng)} }
                        a {
                            class: "button",
                            "data-style": "outline",
                            href: maps_link(lat, lng),
                            target: "_blank",
                            rel: "noopener",
                            "Open in Maps"
                        }
                    }
                },
                None => rsx! {
                    div { class: "map-empty", p { "No positions reported yet." } }
                },
            }
            if let Some(point) = focus.as_ref() {
                div { class: "map-focus",
                    Icon::<LdMapPin> { icon: LdMapPin, width: 16, height: 16 }
                    div {
                        p { class: "strong", "Historical Point" }
                        p { {point.name.clone().unwrap_or_else(|| "Session Record".to_string())} }
                        p { class: "muted", {format_coordinates(point.lat, point.lng)} }
                    }
                }
            }
        }

        if !markers.is_empty() {
            Card { class: "live-locations",
                CardHeader {
                    CardTitle { {text.location.online_personnel} }
                }
                CardContent {
                    ul { class: "location-list",
                        for marker in markers {
                            li { key: "{marker.user_id}",
                                div {
                                    p { class: "strong", "{marker.name}" }
                                    p { class: "muted",
                                        {format_coordinates(marker.location.lat, marker.location.lng)}
                                        " · "
                                        {format_time(&marker.location.timestamp)}
                                    }
                                }
                                if marker.sharing {
                                    Badge { variant: BadgeVariant::Success, {text.location.live} }
                                }
                                a {
                                    class: "icon-button",
                                    href: maps_link(marker.location.lat, marker.location.lng),
                                    target: "_blank",
                                    rel: "noopener",
                                    Icon::<LdMapPin> { icon: LdMapPin, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }
        }

        Card { class: "session-history",
            CardHeader {
                CardTitle { {text.location.session_history} }
                CardDescription { {text.location.audit_sub} }
            }
            CardContent {
                SessionTable {
                    records: history,
                    show_names: is_owner,
                    on_share: move |point: (f64, f64)| share_target.set(Some(point)),
                }
            }
        }

        SharePointModal {
            target: share_target(),
            on_close: move |_| share_target.set(None),
        }
    }
}

/// Share dialog for one recorded point.
#[component]
fn SharePointModal(target: Option<(f64, f64)>, on_close: EventHandler<()>) -> Element {
    let text = use_strings();
    let mut copied = use_signal(|| false);

    let link = target.map(|(lat, lng)| maps_link(lat, lng)).unwrap_or_default();
    let whatsapp = whatsapp_share_url(SHARE_MESSAGE, &link);
    let to_copy = link.clone();

    rsx! {
        Modal {
            open: target.is_some(),
            title: text.home.share.title.to_string(),
            on_close: move |_| {
                copied.set(false);
                on_close.call(());
            },
            p { class: "muted", {text.home.share.subtitle} }
            div { class: "share-actions",
                a { class: "button", "data-style": "success", href: "{whatsapp}", target: "_blank", rel: "noopener",
                    {text.home.share.whatsapp}
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| {
                        browser::copy_to_clipboard(&to_copy);
                        copied.set(true);
                    },
                    Icon::<LdCopy> { icon: LdCopy, width: 16, height: 16 }
                    if copied() { {text.home.share.copied} } else { {text.home.share.copy_link} }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn focus_needs_both_coordinates() {
        assert_eq!(FocusPoint::from_query(Some("12.5"), None, None), None);
        assert_eq!(FocusPoint::from_query(Some("north"), Some("1"), None), None);
        assert_eq!(
            FocusPoint::from_query(Some("12.5"), Some("77.25"), Some("Sarah%20Chen")),
            Some(FocusPoint {
                lat: 12.5,
                lng: 77.25,
                name: Some("Sarah Chen".into()),
            })
        );
    }

    #[test]
    fn blank_focus_name_is_dropped() {
        let point = FocusPoint::from_query(Some("1"), Some("2"), Some("")).unwrap();
        assert_eq!(point.name, None);
    }
}
