use std::collections::HashMap;

use crate::auth::use_auth;
use crate::i18n::use_strings;
use crate::live::use_workspace;
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBan, LdRepeat, LdSearch, LdUserCheck, LdUserPlus};
use dioxus_free_icons::Icon;
use shared_types::{AppError, NewEmployeeRequest, User, UserStatus};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input,
    Modal, PageActions, PageHeader, PageSubtitle, PageTitle,
};

/// Case-insensitive match on name, email or role.
fn search_users(users: &[User], term: &str) -> Vec<User> {
    let needle = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle)
                || u.role.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Blank optional form fields travel as `None`.
fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Owner-only personnel directory.
#[component]
pub fn Users() -> Element {
    let workspace = use_workspace();
    let mut auth = use_auth();
    let text = use_strings();

    let mut search = use_signal(String::new);
    let mut adding = use_signal(|| false);
    let mut banner = use_signal(|| Option::<String>::None);

    let Some(snap) = workspace.snapshot.read().clone() else {
        return rsx! {
            div { class: "page-loading", p { "Loading workspace..." } }
        };
    };

    let shown = search_users(&snap.users, &search());
    let me_id = snap.me.id.clone();

    let toggle_status = move |user: User| {
        spawn(async move {
            match server::api::set_user_status(user.id.clone(), user.status.toggled()).await {
                Ok(updated) => {
                    tracing::info!(user_id = %updated.id, status = ?updated.status, "Access changed");
                    let _ = workspace.reload().await;
                }
                Err(e) => banner.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    let switch_to = move |user_id: String| {
        spawn(async move {
            match server::api::switch_user(user_id).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Switched active user");
                    auth.set_user(user);
                    let _ = workspace.reload().await;
                    navigator().push(Route::Home {});
                }
                Err(e) => banner.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        PageHeader {
            div {
                PageTitle { {text.users.title} }
                PageSubtitle { {text.users.subtitle} }
            }
            PageActions {
                Button { onclick: move |_| adding.set(true),
                    Icon::<LdUserPlus> { icon: LdUserPlus, width: 18, height: 18 }
                    {text.users.add_employee}
                }
            }
        }

        if let Some(message) = banner() {
            p { class: "banner banner-error", role: "alert", "{message}" }
        }

        Card {
            CardHeader {
                CardTitle { {text.users.directory} }
                div { class: "search-field",
                    Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                    input {
                        class: "input",
                        r#type: "search",
                        placeholder: text.users.search_placeholder,
                        value: "{search}",
                        oninput: move |e: FormEvent| search.set(e.value()),
                    }
                }
            }
            CardContent {
                table { class: "data-table",
                    thead {
                        tr {
                            th { {text.users.name} }
                            th { {text.users.designation} }
                            th { {text.users.role} }
                            th { {text.users.status} }
                            th { class: "numeric", {text.users.actions} }
                        }
                    }
                    tbody {
                        for user in shown {
                            tr { key: "{user.id}",
                                td {
                                    div { class: "user-cell",
                                        img { class: "avatar", src: "{user.avatar}", alt: "{user.initial()}" }
                                        div {
                                            p { class: "strong", "{user.name}" }
                                            p { class: "row-caption", "{user.email}" }
                                        }
                                    }
                                }
                                td { "{user.designation}" }
                                td {
                                    Badge {
                                        variant: if user.role.is_owner() { BadgeVariant::Primary } else { BadgeVariant::Secondary },
                                        {user.role.as_str()}
                                    }
                                }
                                td {
                                    if user.status == UserStatus::Active {
                                        Badge { variant: BadgeVariant::Success, {text.users.active} }
                                    } else {
                                        Badge { variant: BadgeVariant::Destructive, {text.users.disabled} }
                                    }
                                }
                                td { class: "numeric",
                                    if user.id != me_id {
                                        div { class: "row-actions",
                                            if user.is_active() {
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let id = user.id.clone();
                                                        move |_| switch_to(id.clone())
                                                    },
                                                    Icon::<LdRepeat> { icon: LdRepeat, width: 14, height: 14 }
                                                    "Switch"
                                                }
                                            }
                                            Button {
                                                variant: if user.is_active() { ButtonVariant::Destructive } else { ButtonVariant::Success },
                                                onclick: {
                                                    let user = user.clone();
                                                    move |_| toggle_status(user.clone())
                                                },
                                                if user.is_active() {
                                                    Icon::<LdBan> { icon: LdBan, width: 14, height: 14 }
                                                    {text.users.deny}
                                                } else {
                                                    Icon::<LdUserCheck> { icon: LdUserCheck, width: 14, height: 14 }
                                                    {text.users.grant}
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
        }

        AddEmployeeModal {
            open: adding(),
            on_close: move |_| adding.set(false),
        }
    }
}

#[component]
fn AddEmployeeModal(open: bool, on_close: EventHandler<()>) -> Element {
    let workspace = use_workspace();
    let text = use_strings();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut designation = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);

    let mut reset = move || {
        name.set(String::new());
        email.set(String::new());
        designation.set(String::new());
        mobile.set(String::new());
        password.set(String::new());
        error_msg.set(None);
        field_errors.set(HashMap::new());
    };

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let req = NewEmployeeRequest {
            name: name().trim().to_string(),
            email: email().trim().to_string(),
            designation: designation().trim().to_string(),
            mobile: non_blank(&mobile()),
            password: non_blank(&password()),
        };
        match server::api::add_employee(req).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Employee registered");
                reset();
                let _ = workspace.reload().await;
                on_close.call(());
            }
            Err(e) => {
                let raw = e.to_string();
                field_errors.set(AppError::parse_field_errors(&raw));
                error_msg.set(Some(AppError::friendly_message(&raw)));
            }
        }
        saving.set(false);
    };

    rsx! {
        Modal {
            open,
            title: text.users.new_employee.to_string(),
            on_close: move |_| {
                reset();
                on_close.call(());
            },
            form { class: "employee-form", onsubmit: handle_submit,
                Input {
                    label: text.users.form_name.to_string(),
                    value: name(),
                    error: field_errors.read().get("name").cloned(),
                    on_input: move |e: FormEvent| name.set(e.value()),
                }
                Input {
                    label: text.users.form_email.to_string(),
                    input_type: "email",
                    value: email(),
                    error: field_errors.read().get("email").cloned(),
                    on_input: move |e: FormEvent| email.set(e.value()),
                }
                Input {
                    label: text.users.form_designation.to_string(),
                    value: designation(),
                    error: field_errors.read().get("designation").cloned(),
                    on_input: move |e: FormEvent| designation.set(e.value()),
                }
                Input {
                    label: text.users.form_mobile.to_string(),
                    input_type: "tel",
                    value: mobile(),
                    on_input: move |e: FormEvent| mobile.set(e.value()),
                }
                div { class: "password-field",
                    Input {
                        label: text.users.form_password.to_string(),
                        input_type: if show_password() { "text".to_string() } else { "password".to_string() },
                        value: password(),
                        error: field_errors.read().get("password").cloned(),
                        on_input: move |e: FormEvent| password.set(e.value()),
                    }
                    button {
                        r#type: "button",
                        class: "link-button",
                        onclick: move |_| show_password.toggle(),
                        if show_password() { "Hide" } else { "Show" }
                    }
                }

                if let Some(message) = error_msg() {
                    p { class: "form-error", role: "alert", "{message}" }
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| {
                            reset();
                            on_close.call(());
                        },
                        {text.users.cancel}
                    }
                    Button { submit: true, disabled: saving(),
                        {text.users.confirm}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::UserRole;

    fn user(id: &str, name: &str, email: &str, role: UserRole) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status: UserStatus::Active,
            avatar: String::new(),
            designation: String::new(),
            mobile: None,
            password_hash: None,
        }
    }

    #[test]
    fn search_matches_name_email_or_role() {
        let users = vec![
            user("1", "Admin Owner", "owner@workforce.com", UserRole::Owner),
            user("2", "Sarah Chen", "sarah@workforce.com", UserRole::Employee),
        ];
        assert_eq!(search_users(&users, "sarah").len(), 1);
        assert_eq!(search_users(&users, "OWNER@")[0].id, "1");
        assert_eq!(search_users(&users, "employee")[0].id, "2");
        assert_eq!(search_users(&users, "  ").len(), 2);
    }

    #[test]
    fn blank_optionals_are_dropped() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" 555 "), Some("555".to_string()));
    }
}
