use crate::format_helpers::{format_amount, format_coordinates, format_day, format_optional_time};
use crate::i18n::use_strings;
use crate::live::use_workspace;
use crate::routes::Route;
use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCalendar, LdMapPin, LdNavigation, LdSearch};
use dioxus_free_icons::Icon;
use shared_types::{monthly_totals, search_attendance};
use shared_ui::{
    Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageSubtitle,
    PageTitle,
};

/// "2025-02" as "Feb 2025". Unparseable keys pass through.
fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Owner reports: monthly spend and the full attendance audit trail.
#[component]
pub fn Reports() -> Element {
    let workspace = use_workspace();
    let text = use_strings();
    let mut search = use_signal(String::new);

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    let months = monthly_totals(&snap.bills);
    let grand_total: f64 = months.iter().map(|(_, v)| v).sum();
    let records = search_attendance(&snap.attendance, &search());

    rsx! {
        PageHeader {
            div {
                PageTitle { {text.reports.title} }
                PageSubtitle { {text.reports.subtitle} }
            }
        }

        Card { class: "expense-trends",
            CardHeader {
                CardTitle { {text.reports.expense_trends} }
                CardDescription { {text.reports.trends_sub} }
                p { class: "header-stat-value",
                    {text.reports.total}
                    " "
                    {format_amount(grand_total)}
                }
            }
            CardContent {
                table { class: "data-table",
                    thead {
                        tr {
                            th { {text.reports.month} }
                            th { class: "numeric", {text.reports.total} }
                        }
                    }
                    tbody {
                        if months.is_empty() {
                            tr {
                                td { class: "empty-row", colspan: 2, {text.reports.no_records} }
                            }
                        }
                        for (month, amount) in months {
                            tr { key: "{month}",
                                td { class: "strong", {month_label(&month)} }
                                td { class: "numeric", {format_amount(amount)} }
                            }
                        }
                    }
                }
            }
        }

        Card { class: "audit-trail",
            CardHeader {
                CardTitle { {text.reports.audit_trail} }
                CardDescription { {text.reports.audit_sub} }
                div { class: "search-field",
                    Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                    input {
                        class: "input",
                        r#type: "search",
                        placeholder: text.reports.search_placeholder,
                        value: "{search}",
                        oninput: move |e: FormEvent| search.set(e.value()),
                    }
                }
            }
            CardContent {
                table { class: "data-table",
                    thead {
                        tr {
                            th { {text.reports.personnel} }
                            th { {text.reports.date} }
                            th { {text.reports.check_in} }
                            th { {text.reports.check_out} }
                            th { {text.reports.location_context} }
                            th { class: "numeric", {text.reports.session_length} }
                        }
                    }
                    tbody {
                        if records.is_empty() {
                            tr {
                                td { class: "empty-row", colspan: 6, {text.reports.no_records} }
                            }
                        }
                        for record in records {
                            tr { key: "{record.id}",
                                td {
                                    div { class: "user-cell",
                                        span { class: "avatar avatar-initial",
                                            {record.employee_name.chars().next().unwrap_or('?').to_uppercase().to_string()}
                                        }
                                        div {
                                            p { class: "strong", "{record.employee_name}" }
                                            p { class: "row-caption", "ID {record.employee_id}" }
                                        }
                                    }
                                }
                                td {
                                    Icon::<LdCalendar> { icon: LdCalendar, width: 14, height: 14 }
                                    {format_day(&record.check_in)}
                                }
                                td { {record.check_in.format("%-I:%M:%S %p").to_string()} }
                                td { {format_optional_time(record.check_out.as_ref())} }
                                td {
                                    match record.check_in_loc {
                                        Some(loc) => rsx! {
                                            div { class: "location-context",
                                                Icon::<LdMapPin> { icon: LdMapPin, width: 12, height: 12 }
                                                {format_coordinates(loc.lat, loc.lng)}
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
                                        },
                                        None => rsx! { span { class: "muted", "---" } },
                                    }
                                }
                                td { class: "numeric",
                                    match record.duration_hours() {
                                        Some(hours) => rsx! { "{hours:.2} {text.reports.hrs}" },
                                        None => rsx! { span { class: "text-positive", {text.reports.active_now} } },
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_read_as_names() {
        assert_eq!(month_label("2025-02"), "Feb 2025");
        assert_eq!(month_label("unknown"), "unknown");
    }
}
