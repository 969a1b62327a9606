use crate::format_helpers::format_time;
use crate::i18n::use_strings;
use crate::live::use_workspace;
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCircleCheck, LdClock, LdNavigation, LdShare2};
use dioxus_free_icons::Icon;
use shared_types::{attendance_history, AttendanceRecord};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Full session history for the signed-in employee.
#[component]
pub fn EmployeeHistory() -> Element {
    let workspace = use_workspace();
    let text = use_strings();

    let records = workspace
        .snapshot
        .read()
        .as_ref()
        .map(|s| attendance_history(&s.attendance, &s.me))
        .unwrap_or_default();

    rsx! {
        Card { class: "session-history",
            CardHeader {
                div { class: "card-title-row",
                    Icon::<LdClock> { icon: LdClock, width: 24, height: 24 }
                    div {
                        CardTitle { {text.location.session_history} }
                        CardDescription { {text.location.audit_sub} }
                    }
                }
            }
            CardContent {
                SessionTable { records, show_names: false }
            }
        }
    }
}

/// Shared attendance table. With `show_names` each row carries the
/// employee's name and a focus link; with `on_share` each row gets a share
/// button for its check-in point.
#[component]
pub fn SessionTable(
    records: Vec<AttendanceRecord>,
    show_names: bool,
    #[props(default)] on_share: Option<EventHandler<(f64, f64)>>,
) -> Element {
    let text = use_strings();

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { {text.location.date} }
                    th { {text.location.check_in} }
                    th { {text.location.check_out} }
                    th { class: "numeric", {text.location.total_duration} }
                }
            }
            tbody {
                if records.is_empty() {
                    tr {
                        td { class: "empty-row", colspan: 4, {text.location.no_logs} }
                    }
                }
                for record in records {
                    tr { key: "{record.id}",
                        td {
                            p { class: "strong", {record.check_in.format("%a, %b %-d").to_string()} }
                            if show_names {
                                p { class: "row-caption", "{record.employee_name}" }
                            }
                        }
                        td { {format_time(&record.check_in)} }
                        td {
                            match record.check_out.as_ref() {
                                Some(out) => rsx! { {format_time(out)} },
                                None => rsx! { span { class: "live-pill", {text.location.live} } },
                            }
                        }
                        td { class: "numeric",
                            div { class: "row-actions",
                                if let Some(loc) = record.check_in_loc {
                                    if show_names {
                                        Link {
                                            to: Route::Location {
                                                lat: Some(loc.lat.to_string()),
                                                lng: Some(loc.lng.to_string()),
                                                name: Some(record.employee_name.clone()),
                                            },
                                            class: "icon-button",
                                            Icon::<LdNavigation> { icon: LdNavigation, width: 12, height: 12 }
                                        }
                                    }
                                    if let Some(handler) = on_share {
                                        button {
                                            class: "icon-button",
                                            title: text.location.share,
                                            onclick: move |_| handler.call((loc.lat, loc.lng)),
                                            Icon::<LdShare2> { icon: LdShare2, width: 12, height: 12 }
                                        }
                                    }
                                }
                                span { class: "duration-pill",
                                    if !record.is_open() {
                                        Icon::<LdCircleCheck> { icon: LdCircleCheck, width: 12, height: 12 }
                                    }
                                    {duration_label(&record, text.location.hrs)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// "7.50 HRS" for a closed shift, "Active" while open.
fn duration_label(record: &AttendanceRecord, hrs: &str) -> String {
    if record.is_open() {
        record.format_duration()
    } else {
        format!("{} {hrs}", record.format_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(open: bool) -> AttendanceRecord {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        AttendanceRecord {
            id: "a".into(),
            employee_id: "2".into(),
            employee_name: "Sarah Chen".into(),
            check_in: start,
            check_out: (!open).then(|| start + Duration::minutes(450)),
            check_in_loc: None,
            check_out_loc: None,
        }
    }

    #[test]
    fn durations_carry_the_unit_once_closed() {
        assert_eq!(duration_label(&record(false), "HRS"), "7.50 HRS");
        assert_eq!(duration_label(&record(true), "HRS"), "Active");
    }
}
