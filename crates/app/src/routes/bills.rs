use std::collections::HashMap;

use crate::auth::use_is_owner;
use crate::format_helpers::{format_amount, format_date_heading, format_date_human};
use crate::i18n::use_strings;
use crate::live::use_workspace;
use base64::{engine::general_purpose, Engine as _};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdCalendar, LdCamera, LdCheck, LdFilter, LdImage, LdLoader, LdPlus, LdSparkles, LdUpload, LdX,
};
use dioxus_free_icons::Icon;
use shared_types::{
    group_by_date, scope_bills, AppError, Bill, BillDraft, BillFilter, BillStatus, CATEGORIES,
};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, Modal, PageActions, PageHeader,
    PageSubtitle, PageTitle,
};

/// Sentinel `<option>` value for "no filter".
const ALL: &str = "ALL";

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn status_badge(status: BillStatus) -> BadgeVariant {
    match status {
        BillStatus::Approved => BadgeVariant::Success,
        BillStatus::Rejected => BadgeVariant::Destructive,
        BillStatus::Pending => BadgeVariant::Warning,
    }
}

/// `data:<mime>;base64,<payload>` for an uploaded receipt.
fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{content_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Amount field text to a number. Blank or junk input counts as zero.
fn parse_amount_input(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|a| a.is_finite()).unwrap_or(0.0)
}

/// Expense claims: the owner reviews everyone's, employees file and track
/// their own.
#[component]
pub fn Bills() -> Element {
    let workspace = use_workspace();
    let is_owner = use_is_owner();
    let text = use_strings();

    let mut filter = use_signal(BillFilter::default);
    let mut adding = use_signal(|| false);
    let mut banner = use_signal(|| Option::<String>::None);

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    let visible = filter.read().apply(&scope_bills(&snap.bills, &snap.me));
    let groups = group_by_date(&visible);
    let filter_active = filter.read().is_active();

    let set_status = move |bill_id: String, status: BillStatus| {
        spawn(async move {
            match server::api::update_bill_status(bill_id, status).await {
                Ok(bill) => {
                    tracing::info!(bill_id = %bill.id, status = bill.status.as_str(), "Bill reviewed");
                    let _ = workspace.reload().await;
                }
                Err(e) => banner.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        PageHeader {
            div {
                PageTitle {
                    if is_owner { {text.bills.expense_approvals} } else { {text.bills.expense_hub} }
                }
                PageSubtitle {
                    if is_owner { {text.bills.admin_sub} } else { {text.bills.emp_sub} }
                }
            }
            if !is_owner {
                PageActions {
                    Button { onclick: move |_| adding.set(true),
                        Icon::<LdPlus> { icon: LdPlus, width: 18, height: 18 }
                        {text.bills.new_claim}
                    }
                }
            }
        }

        if let Some(message) = banner() {
            p { class: "banner banner-error", role: "alert", "{message}" }
        }

        div { class: "bills-layout",
            aside { class: "bill-filters",
                div { class: "bill-filters-header",
                    h3 {
                        Icon::<LdFilter> { icon: LdFilter, width: 14, height: 14 }
                        {text.bills.refine_view}
                    }
                    if filter_active {
                        button { class: "link-button", onclick: move |_| filter.write().reset(), "Reset" }
                    }
                }

                label { class: "field-label", {text.bills.process_status} }
                select {
                    class: "select",
                    value: filter.read().status.map(|s| s.as_str()).unwrap_or(ALL),
                    onchange: move |evt: Event<FormData>| {
                        filter.write().status = BillStatus::parse(&evt.value());
                    },
                    option { value: ALL, {text.bills.all_transactions} }
                    option { value: BillStatus::Pending.as_str(), {text.bills.pending_review} }
                    option { value: BillStatus::Approved.as_str(), {text.bills.approved} }
                    option { value: BillStatus::Rejected.as_str(), {text.bills.rejected} }
                }

                label { class: "field-label", {text.bills.category} }
                select {
                    class: "select",
                    value: filter.read().category.clone().unwrap_or_else(|| ALL.to_string()),
                    onchange: move |evt: Event<FormData>| {
                        let value = evt.value();
                        filter.write().category = (value != ALL).then_some(value);
                    },
                    option { value: ALL, {text.bills.all_categories} }
                    for category in CATEGORIES {
                        option { key: "{category}", value: category, {category} }
                    }
                }

                label { class: "field-label", {text.bills.start_date} }
                input {
                    class: "input",
                    r#type: "date",
                    value: filter.read().start_date.clone().unwrap_or_default(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        filter.write().start_date = (!value.is_empty()).then_some(value);
                    },
                }

                label { class: "field-label", {text.bills.end_date} }
                input {
                    class: "input",
                    r#type: "date",
                    value: filter.read().end_date.clone().unwrap_or_default(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        filter.write().end_date = (!value.is_empty()).then_some(value);
                    },
                }
            }

            div { class: "bill-groups",
                if groups.is_empty() {
                    div { class: "empty-state",
                        Icon::<LdImage> { icon: LdImage, width: 40, height: 40 }
                        p {
                            if is_owner { "Waiting for digital submissions..." } else { {text.bills.no_records} }
                        }
                    }
                }
                for group in groups {
                    section { key: "{group.date}", class: "bill-group",
                        div { class: "bill-group-heading",
                            Icon::<LdCalendar> { icon: LdCalendar, width: 14, height: 14 }
                            span { {format_date_heading(&group.date)} }
                            span { class: "bill-group-total", {format_amount(group.total)} }
                        }
                        div { class: "bill-grid",
                            for bill in group.items {
                                BillCard {
                                    key: "{bill.id}",
                                    bill: bill.clone(),
                                    is_owner,
                                    on_review: move |(id, status): (String, BillStatus)| set_status(id, status),
                                }
                            }
                        }
                    }
                }
            }
        }

        NewClaimModal {
            open: adding() && !is_owner,
            on_close: move |_| adding.set(false),
        }
    }
}

#[component]
fn BillCard(bill: Bill, is_owner: bool, on_review: EventHandler<(String, BillStatus)>) -> Element {
    let text = use_strings();
    let approve_id = bill.id.clone();
    let reject_id = bill.id.clone();

    rsx! {
        Card { class: "bill-card",
            div { class: "bill-card-image",
                if !bill.image_url.is_empty() {
                    img { src: "{bill.image_url}", alt: "Receipt" }
                }
                Badge { variant: status_badge(bill.status), {bill.status.as_str()} }
            }
            CardContent {
                div { class: "bill-card-head",
                    div {
                        h4 { {format_amount(bill.amount)} }
                        p { class: "row-caption", {format_date_human(&bill.date)} }
                    }
                    Badge { variant: BadgeVariant::Secondary, "{bill.category}" }
                }
                p { class: "bill-description", "{bill.description}" }
                p { class: "row-caption",
                    if is_owner { "From: {bill.employee_name}" } else { "My submission" }
                }
                if is_owner && bill.status == BillStatus::Pending {
                    div { class: "bill-actions",
                        Button {
                            variant: ButtonVariant::Success,
                            onclick: move |_| on_review.call((approve_id.clone(), BillStatus::Approved)),
                            Icon::<LdCheck> { icon: LdCheck, width: 14, height: 14 }
                            {text.bills.approve}
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| on_review.call((reject_id.clone(), BillStatus::Rejected)),
                            Icon::<LdX> { icon: LdX, width: 14, height: 14 }
                            {text.bills.reject}
                        }
                    }
                }
            }
        }
    }
}

/// Claim form. Picking a receipt photo sends it for analysis and
/// pre-fills whatever fields come back.
#[component]
fn NewClaimModal(open: bool, on_close: EventHandler<()>) -> Element {
    let text = use_strings();
    let workspace = use_workspace();

    let mut draft = use_signal(|| BillDraft::new(&today()));
    let mut amount_text = use_signal(String::new);
    let mut analyzing = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);

    let handle_file = move |evt: FormEvent| async move {
        let files = evt.files();
        let Some(file) = files.first() else {
            return;
        };
        let content_type = file.content_type().unwrap_or_else(|| "image/jpeg".to_string());
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes,
            Err(_) => {
                error_msg.set(Some("Failed to read file.".to_string()));
                return;
            }
        };
        let data_url = to_data_url(&content_type, &bytes);
        draft.write().image_url = data_url.clone();
        error_msg.set(None);

        analyzing.set(true);
        match server::api::analyze_receipt(data_url).await {
            Ok(analysis) => {
                let mut d = draft.write();
                d.apply_analysis(&analysis);
                amount_text.set(format_amount(d.amount));
            }
            // The claim can still be filled in by hand.
            Err(e) => tracing::warn!(error = %e, "Receipt analysis failed"),
        }
        analyzing.set(false);
    };

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        field_errors.set(HashMap::new());
        if draft.read().image_url.is_empty() {
            error_msg.set(Some("Please upload a bill image first.".to_string()));
            return;
        }

        submitting.set(true);
        let mut payload = draft();
        payload.amount = parse_amount_input(&amount_text());
        match server::api::submit_bill(payload).await {
            Ok(bill) => {
                tracing::info!(bill_id = %bill.id, "Claim filed");
                draft.set(BillDraft::new(&today()));
                amount_text.set(String::new());
                let _ = workspace.reload().await;
                on_close.call(());
            }
            Err(e) => {
                let raw = e.to_string();
                field_errors.set(AppError::parse_field_errors(&raw));
                error_msg.set(Some(AppError::friendly_message(&raw)));
            }
        }
        submitting.set(false);
    };

    let image_url = draft.read().image_url.clone();

    rsx! {
        Modal {
            open,
            title: text.bills.expense_entry.to_string(),
            on_close: move |_| on_close.call(()),
            p { class: "muted", {text.bills.ai_sub} }

            form { class: "claim-form", onsubmit: handle_submit,
                label { class: "receipt-drop",
                    "data-filled": if image_url.is_empty() { "false" } else { "true" },
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "visually-hidden",
                        onchange: handle_file,
                    }
                    if analyzing() {
                        div { class: "receipt-analyzing",
                            Icon::<LdLoader> { icon: LdLoader, width: 32, height: 32 }
                            span {
                                Icon::<LdSparkles> { icon: LdSparkles, width: 14, height: 14 }
                                {text.bills.analyzing}
                            }
                        }
                    }
                    if image_url.is_empty() {
                        Icon::<LdCamera> { icon: LdCamera, width: 32, height: 32 }
                        span { {text.bills.select} }
                    } else {
                        img { src: "{image_url}", alt: "Receipt preview" }
                        span { class: "receipt-replace",
                            Icon::<LdUpload> { icon: LdUpload, width: 14, height: 14 }
                            {text.bills.replace}
                        }
                    }
                }

                div { class: "form-row",
                    div { class: "input-wrapper",
                        label { class: "field-label", {text.bills.date} }
                        input {
                            class: "input",
                            r#type: "date",
                            value: "{draft.read().date}",
                            oninput: move |e: FormEvent| draft.write().date = e.value(),
                        }
                        if let Some(err) = field_errors.read().get("date") {
                            p { class: "field-error", "{err}" }
                        }
                    }
                    div { class: "input-wrapper",
                        label { class: "field-label", {text.bills.amount} }
                        input {
                            class: "input",
                            r#type: "number",
                            step: "0.01",
                            min: "0",
                            placeholder: "0.00",
                            value: "{amount_text}",
                            oninput: move |e: FormEvent| amount_text.set(e.value()),
                        }
                        if let Some(err) = field_errors.read().get("amount") {
                            p { class: "field-error", "{err}" }
                        }
                    }
                }

                label { class: "field-label", {text.bills.classification} }
                select {
                    class: "select",
                    value: "{draft.read().category}",
                    onchange: move |e: Event<FormData>| draft.write().category = e.value(),
                    for category in CATEGORIES {
                        option { key: "{category}", value: category, {category} }
                    }
                }

                label { class: "field-label", {text.bills.description} }
                textarea {
                    class: "textarea",
                    rows: 3,
                    placeholder: text.bills.brief,
                    value: "{draft.read().description}",
                    oninput: move |e: FormEvent| draft.write().description = e.value(),
                }

                if let Some(message) = error_msg() {
                    p { class: "form-error", role: "alert", "{message}" }
                }

                Button { submit: true, disabled: submitting() || analyzing(),
                    if submitting() { {text.bills.processing} } else { {text.bills.authorize} }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipts_travel_as_data_urls() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn amount_input_is_forgiving() {
        assert_eq!(parse_amount_input(" 42.50 "), 42.5);
        assert_eq!(parse_amount_input(""), 0.0);
        assert_eq!(parse_amount_input("abc"), 0.0);
    }

    #[test]
    fn status_colours() {
        assert_eq!(status_badge(BillStatus::Approved), BadgeVariant::Success);
        assert_eq!(status_badge(BillStatus::Pending), BadgeVariant::Warning);
    }

    #[test]
    fn today_is_iso() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert_eq!(&d[4..5], "-");
    }
}
