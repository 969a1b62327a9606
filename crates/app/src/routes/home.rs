use crate::auth::use_is_owner;
use crate::browser;
use crate::format_helpers::{
    format_day, format_optional_time, format_relative, format_time, whatsapp_share_url,
};
use crate::i18n::use_strings;
use crate::live::{use_now, use_workspace};
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdActivity, LdCopy, LdFingerprint, LdKeyRound, LdMapPin, LdPlay, LdReceipt, LdRefreshCw,
    LdShare2, LdSquare, LdX,
};
use dioxus_free_icons::Icon;
use shared_types::{
    attendance_history, is_valid_otp_format, recent_for, sanitize_otp_input, AppError,
    ShiftConfig, ShiftRequest, ShiftRequestType, WorkspaceSnapshot,
};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Countdown, Modal, PageHeader, PageSubtitle, PageTitle, StatCard, StatTone,
};

/// Prefix of the WhatsApp share message.
const SHARE_MESSAGE: &str = "My live professional location:";

/// How many of their own sessions an employee sees on the home page.
const RECENT_SESSIONS: usize = 3;

fn otp_ttl() -> i64 {
    ShiftConfig::default().otp_ttl_secs
}

/// Home page: the shift manager for employees, the command center for
/// the owner.
#[component]
pub fn Home() -> Element {
    let workspace = use_workspace();
    let is_owner = use_is_owner();

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    if is_owner {
        rsx! { OwnerHome { snap } }
    } else {
        rsx! { EmployeeHome { snap } }
    }
}

#[component]
fn EmployeeHome(snap: WorkspaceSnapshot) -> Element {
    let text = use_strings();
    let mut share_open = use_signal(|| false);

    let checked_in = snap.is_checked_in();
    let request = snap.my_request().cloned();
    let recent = recent_for(&snap.attendance, &snap.me.id, RECENT_SESSIONS);

    rsx! {
        PageHeader {
            div {
                PageTitle { {text.home.workspace} }
                PageSubtitle { {text.home.workspace_sub} }
            }
            if checked_in {
                Badge { variant: BadgeVariant::Success, {text.home.shift_active} }
            } else {
                Badge { variant: BadgeVariant::Outline, {text.home.offline} }
            }
        }

        Card { class: "shift-card",
            CardContent {
                match request {
                    Some(request) => rsx! { OtpEntry { request } },
                    None => rsx! {
                        ShiftControls {
                            checked_in,
                            sharing: snap.sharing_location,
                            on_share: move |_| share_open.set(true),
                        }
                    },
                }
            }
        }

        Card { class: "recent-attendance",
            CardHeader {
                CardTitle { {text.home.recent_attendance} }
                Link { to: Route::EmployeeHistory {}, class: "card-link", {text.home.view_history} }
            }
            CardContent {
                table { class: "data-table",
                    thead {
                        tr {
                            th { {text.home.date} }
                            th { {text.home.start} }
                            th { {text.home.end} }
                            th { class: "numeric", {text.home.duration} }
                        }
                    }
                    tbody {
                        for record in recent {
                            tr { key: "{record.id}",
                                td { {format_day(&record.check_in)} }
                                td { {format_time(&record.check_in)} }
                                td {
                                    if record.is_open() {
                                        span { class: "text-positive", {text.home.working} }
                                    } else {
                                        {format_optional_time(record.check_out.as_ref())}
                                    }
                                }
                                td { class: "numeric",
                                    Badge { variant: BadgeVariant::Secondary,
                                        {record.duration_hours().map(|h| format!("{h:.2} hrs")).unwrap_or_else(|| "--".to_string())}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        ShareLocationModal {
            open: share_open(),
            on_close: move |_| share_open.set(false),
        }
    }
}

/// Start or stop buttons plus the share toggle, shown while no request is
/// outstanding.
#[component]
fn ShiftControls(checked_in: bool, sharing: bool, on_share: EventHandler<()>) -> Element {
    let text = use_strings();
    let workspace = use_workspace();
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let mut request = move |kind: ShiftRequestType| {
        busy.set(true);
        error.set(None);
        spawn(async move {
            match server::api::request_shift_action(kind).await {
                Ok(req) => {
                    tracing::info!(request_id = %req.id, kind = req.kind.as_str(), "Shift request sent");
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "shift-controls",
            h2 { {text.home.shift_manager} }
            p { class: "muted", {text.home.shift_sub} }

            if checked_in {
                Button {
                    variant: ButtonVariant::Destructive,
                    class: "shift-button",
                    disabled: busy(),
                    onclick: move |_| request(ShiftRequestType::Stop),
                    Icon::<LdSquare> { icon: LdSquare, width: 20, height: 20 }
                    {text.home.stop_shift}
                }
            } else {
                Button {
                    class: "shift-button",
                    disabled: busy(),
                    onclick: move |_| request(ShiftRequestType::Start),
                    Icon::<LdPlay> { icon: LdPlay, width: 20, height: 20 }
                    {text.home.start_shift}
                }
            }

            Button {
                variant: if sharing { ButtonVariant::Secondary } else { ButtonVariant::Outline },
                class: "share-button",
                onclick: move |_| on_share.call(()),
                Icon::<LdShare2> { icon: LdShare2, width: 14, height: 14 }
                if sharing { {text.home.sharing_active} } else { {text.home.location_sharing} }
            }

            if let Some(message) = error() {
                p { class: "form-error", role: "alert", "{message}" }
            }
        }
    }
}

/// Code entry for an outstanding request. The code itself never reaches
/// the employee's client; it is read out by the owner.
#[component]
fn OtpEntry(request: ShiftRequest) -> Element {
    let text = use_strings();
    let workspace = use_workspace();
    let now = use_now();
    let mut otp = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut verifying = use_signal(|| false);

    let authorized = request.is_authorized();
    let expired = request.is_otp_expired(now());
    let seconds_left = request.seconds_left(now());
    let can_verify = authorized && !expired && !verifying() && is_valid_otp_format(&otp());

    let verify = move |_| {
        verifying.set(true);
        error.set(None);
        spawn(async move {
            let location = browser::current_position().await;
            match server::api::confirm_shift_action(otp(), location).await {
                Ok(message) => {
                    tracing::info!(%message, "Shift action confirmed");
                    otp.set(String::new());
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            verifying.set(false);
        });
    };

    let cancel = move |_| {
        spawn(async move {
            match server::api::cancel_shift_request().await {
                Ok(()) => {
                    otp.set(String::new());
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        div { class: "otp-entry",
            div { class: "otp-entry-header",
                Icon::<LdFingerprint> { icon: LdFingerprint, width: 36, height: 36 }
                div {
                    h3 { {text.home.otp_required} }
                    p { class: "muted", {text.home.otp_sub} }
                }
                if authorized {
                    Countdown { seconds_left, total_seconds: otp_ttl() }
                }
            }

            input {
                class: "otp-input",
                r#type: "text",
                inputmode: "numeric",
                maxlength: 6,
                placeholder: "000000",
                value: "{otp}",
                oninput: move |e: FormEvent| otp.set(sanitize_otp_input(&e.value())),
            }

            if !authorized {
                p { class: "otp-waiting",
                    Icon::<LdRefreshCw> { icon: LdRefreshCw, width: 14, height: 14 }
                    {text.home.waiting_otp}
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", role: "alert", "{message}" }
            }

            div { class: "otp-actions",
                Button { disabled: !can_verify, onclick: verify,
                    if verifying() { "Verifying..." } else { {text.home.verify} }
                }
                Button { variant: ButtonVariant::Outline, onclick: cancel,
                    Icon::<LdX> { icon: LdX, width: 16, height: 16 }
                    {text.home.cancel}
                }
            }
        }
    }
}

/// Share dialog for the viewer's latest fix: map link, WhatsApp, copy and
/// the broadcast switch.
#[component]
pub fn ShareLocationModal(open: bool, on_close: EventHandler<()>) -> Element {
    let text = use_strings();
    let workspace = use_workspace();
    let mut copied = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let snap = workspace.snapshot.read().clone();
    let sharing = snap.as_ref().is_some_and(|s| s.sharing_location);
    let maps_url = snap
        .as_ref()
        .and_then(|s| s.my_location().map(|l| l.maps_url()));

    let toggle = move |_| {
        spawn(async move {
            match server::api::toggle_location_sharing().await {
                Ok(on) => {
                    tracing::info!(sharing = on, "Location sharing toggled");
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        Modal {
            open,
            title: text.home.share.title.to_string(),
            on_close: move |_| {
                copied.set(false);
                on_close.call(());
            },
            p { class: "muted", {text.home.share.subtitle} }

            match maps_url {
                Some(url) => {
                    let whatsapp = whatsapp_share_url(SHARE_MESSAGE, &url);
                    let to_copy = url.clone();
                    rsx! {
                        a { class: "share-map-link", href: "{url}", target: "_blank", rel: "noopener",
                            Icon::<LdMapPin> { icon: LdMapPin, width: 16, height: 16 }
                            "{url}"
                        }
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
                None => rsx! {
                    p { class: "muted", "No position fix yet. Turn on broadcasting to publish one." }
                },
            }

            div { class: "share-toggle",
                span { if sharing { {text.home.broadcast_on} } else { {text.home.broadcast_off} } }
                Button {
                    variant: if sharing { ButtonVariant::Destructive } else { ButtonVariant::Primary },
                    onclick: toggle,
                    if sharing { "Stop" } else { "Start" }
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", role: "alert", "{message}" }
            }
        }
    }
}

#[component]
fn OwnerHome(snap: WorkspaceSnapshot) -> Element {
    let text = use_strings();
    let stats = snap.owner_stats();
    let history = attendance_history(&snap.attendance, &snap.me);

    rsx! {
        PageHeader {
            div {
                PageTitle { {text.home.command_center} }
                PageSubtitle { {text.home.command_sub} }
            }
        }

        div { class: "stat-grid",
            StatCard {
                label: text.home.active_shifts.to_string(),
                value: stats.active_shifts.to_string(),
                tone: StatTone::Positive,
                Icon::<LdActivity> { icon: LdActivity, width: 22, height: 22 }
            }
            StatCard {
                label: text.home.pending_otp_requests.to_string(),
                value: stats.pending_otp_requests.to_string(),
                tone: if stats.pending_otp_requests > 0 { StatTone::Attention } else { StatTone::Neutral },
                Icon::<LdKeyRound> { icon: LdKeyRound, width: 22, height: 22 }
            }
            StatCard {
                label: text.home.pending_bills.to_string(),
                value: stats.pending_bills.to_string(),
                tone: if stats.pending_bills > 0 { StatTone::Critical } else { StatTone::Neutral },
                onclick: move |_| { navigator().push(Route::Bills {}); },
                Icon::<LdReceipt> { icon: LdReceipt, width: 22, height: 22 }
            }
        }

        if !snap.shift_requests.is_empty() {
            Card { class: "pending-requests",
                CardHeader {
                    CardTitle { {text.home.pending_otp_requests} }
                    CardDescription { {text.home.auto_regen} }
                }
                CardContent {
                    for request in snap.shift_requests.iter().cloned() {
                        PendingRequestRow { key: "{request.id}", request, server_time: snap.server_time }
                    }
                }
            }
        }

        Card { class: "attendance-monitor",
            CardHeader {
                CardTitle { {text.home.attendance_monitor} }
            }
            CardContent {
                table { class: "data-table",
                    thead {
                        tr {
                            th { {text.home.personnel} }
                            th { {text.home.start} }
                            th { {text.home.end} }
                            th { {text.home.location} }
                            th { {text.home.status} }
                        }
                    }
                    tbody {
                        for record in history {
                            tr { key: "{record.id}",
                                td { class: "strong", "{record.employee_name}" }
                                td { {format_time(&record.check_in)} }
                                td { {format_optional_time(record.check_out.as_ref())} }
                                td {
                                    match record.check_in_loc {
                                        Some(loc) => rsx! {
                                            Link {
                                                to: Route::Location {
                                                    lat: Some(loc.lat.to_string()),
                                                    lng: Some(loc.lng.to_string()),
                                                    name: Some(record.employee_name.clone()),
                                                },
                                                class: "map-link",
                                                Icon::<LdMapPin> { icon: LdMapPin, width: 14, height: 14 }
                                                "View"
                                            }
                                        },
                                        None => rsx! { span { class: "muted", "---" } },
                                    }
                                }
                                td {
                                    if record.is_open() {
                                        Badge { variant: BadgeVariant::Success, {text.home.working} }
                                    } else {
                                        Badge { variant: BadgeVariant::Outline, {text.home.completed} }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One outstanding request on the owner dashboard, with its live code.
#[component]
fn PendingRequestRow(request: ShiftRequest, server_time: chrono::DateTime<chrono::Utc>) -> Element {
    let text = use_strings();
    let workspace = use_workspace();
    let now = use_now();
    let mut error = use_signal(|| Option::<String>::None);

    let request_id = request.id.clone();
    let generate = move |_| {
        let id = request_id.clone();
        spawn(async move {
            match server::api::generate_shift_otp(id).await {
                Ok(_) => {
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    let request_id = request.id.clone();
    let deny = move |_| {
        let id = request_id.clone();
        spawn(async move {
            match server::api::deny_shift_request(id).await {
                Ok(()) => {
                    let _ = workspace.reload().await;
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    let seconds_left = request.seconds_left(now());

    rsx! {
        div { class: "request-row",
            div { class: "request-who",
                p { class: "strong", "{request.employee_name}" }
                Badge {
                    variant: if request.kind == ShiftRequestType::Start { BadgeVariant::Primary } else { BadgeVariant::Destructive },
                    {request.kind.as_str()}
                }
                p { class: "muted",
                    {text.home.requested_at}
                    " "
                    {format_relative(&request.created_at, &server_time)}
                }
            }

            match request.otp.as_ref() {
                Some(code) => rsx! {
                    div { class: "request-code",
                        span { class: "muted", {text.home.code_generated} }
                        span { class: "otp-code", "{code}" }
                        Countdown { seconds_left, total_seconds: otp_ttl() }
                    }
                },
                None => rsx! {},
            }

            div { class: "request-actions",
                Button { onclick: generate,
                    Icon::<LdRefreshCw> { icon: LdRefreshCw, width: 14, height: 14 }
                    if request.otp.is_some() { "Regenerate" } else { {text.home.generate_otp} }
                }
                Button { variant: ButtonVariant::Ghost, onclick: deny,
                    {text.home.deny_request}
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", role: "alert", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_live_for_two_minutes() {
        assert_eq!(otp_ttl(), 120);
    }

    #[test]
    fn share_message_leads_the_link() {
        let url = whatsapp_share_url(SHARE_MESSAGE, "https://www.google.com/maps?q=1,2");
        assert!(url.starts_with("https://wa.me/?text=My%20live%20professional%20location"));
    }
}
