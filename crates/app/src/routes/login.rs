use crate::auth::use_auth;
use crate::browser;
use crate::i18n::{use_language, use_strings};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, Language, UserRole};
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input,
};

/// Demo identity filled in by the role tabs.
fn demo_email(role: UserRole) -> &'static str {
    match role {
        UserRole::Owner => "owner@workforce.com",
        _ => "sarah@workforce.com",
    }
}

/// Sign-in page. The browser position, when granted, travels with the
/// request so the sign-in audit records where it came from.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut language = use_language();
    let text = use_strings();
    let lang = *language.language.read();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut active_role = use_signal(|| UserRole::Employee);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if auth.is_authenticated() {
        navigator().push(Route::Home {});
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        if email().trim().is_empty() {
            error_msg.set(Some(text.login.error_empty.to_string()));
            return;
        }
        loading.set(true);

        let location = browser::current_position().await;
        let pw = Some(password()).filter(|p| !p.is_empty());
        match server::api::login(email(), pw, location).await {
            Ok(user) => {
                auth.set_user(user);
                navigator().push(Route::Home {});
            }
            Err(e) => {
                error_msg.set(Some(AppError::friendly_message(&e.to_string())));
            }
        }
        loading.set(false);
    };

    let mut pick_role = move |role: UserRole| {
        active_role.set(role);
        email.set(demo_email(role).to_string());
        password.set(String::new());
    };

    rsx! {
        div { class: "login-page",
            div { class: "language-switch login-language",
                button {
                    class: if lang == Language::En { "lang-option active" } else { "lang-option" },
                    onclick: move |_| language.set(Language::En),
                    "EN"
                }
                button {
                    class: if lang == Language::Ta { "lang-option active" } else { "lang-option" },
                    onclick: move |_| language.set(Language::Ta),
                    "தமிழ்"
                }
            }

            section { class: "login-hero",
                h1 { "SS Technologies" }
                p { class: "login-hero-tag", "Enterprise Core" }
                h2 { "The Hub of Intelligent Operations." }
                p {
                    "Securely manage your workforce, automate expense verification, and scale marketing impact from a single node."
                }
            }

            Card { class: "login-card",
                CardHeader {
                    CardTitle { {text.login.portal_entry} }
                    CardDescription { {text.login.subtitle} }
                }
                CardContent {
                    div { class: "role-tabs",
                        button {
                            r#type: "button",
                            class: if active_role() == UserRole::Employee { "role-tab active" } else { "role-tab" },
                            onclick: move |_| pick_role(UserRole::Employee),
                            {text.login.personnel}
                        }
                        button {
                            r#type: "button",
                            class: if active_role() == UserRole::Owner { "role-tab active" } else { "role-tab" },
                            onclick: move |_| pick_role(UserRole::Owner),
                            {text.login.admin_node}
                        }
                    }

                    form { class: "login-form", onsubmit: handle_login,
                        Input {
                            label: text.login.identity_endpoint.to_string(),
                            input_type: "email",
                            placeholder: "id@sstechnologies.io",
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        Input {
                            label: text.login.security_key.to_string(),
                            input_type: "password",
                            placeholder: "••••••••",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        if let Some(message) = error_msg() {
                            p { class: "form-error", role: "alert", "{message}" }
                        }
                        Button { submit: true, disabled: loading(),
                            if loading() { {text.login.processing} } else { {text.login.establish_connection} }
                        }
                    }
                }
                CardFooter {
                    p { class: "login-footnote", "Sign-in location is recorded for the attendance audit." }
                }
            }
        }
    }
}
