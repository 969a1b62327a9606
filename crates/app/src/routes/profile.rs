use crate::auth::{sign_out, use_auth};
use crate::i18n::{use_language, use_strings};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdGlobe, LdLogOut, LdMail, LdPhone, LdShield};
use dioxus_free_icons::Icon;
use shared_types::Language;
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle,
};

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let mut language = use_language();
    let text = use_strings();
    let lang = *language.language.read();

    let Some(user) = auth.current_user.read().clone() else {
        return rsx! {};
    };

    rsx! {
        Card { class: "profile-card",
            CardContent {
                div { class: "profile-identity",
                    img { class: "avatar avatar-large", src: "{user.avatar}", alt: "{user.initial()}" }
                    div {
                        h1 { "{user.name}" }
                        p { class: "muted", "{user.designation}" }
                    }
                }
                dl { class: "profile-facts",
                    div {
                        dt {
                            Icon::<LdMail> { icon: LdMail, width: 16, height: 16 }
                            {text.profile.email}
                        }
                        dd { "{user.email}" }
                    }
                    div {
                        dt {
                            Icon::<LdShield> { icon: LdShield, width: 16, height: 16 }
                            {text.profile.access_level}
                        }
                        dd {
                            Badge {
                                variant: if user.role.is_owner() { BadgeVariant::Primary } else { BadgeVariant::Secondary },
                                {user.role.as_str()}
                            }
                        }
                    }
                    if let Some(mobile) = user.mobile.as_ref() {
                        div {
                            dt {
                                Icon::<LdPhone> { icon: LdPhone, width: 16, height: 16 }
                                "Mobile"
                            }
                            dd { "{mobile}" }
                        }
                    }
                }
            }
        }

        Card { class: "preferences-card",
            CardHeader {
                CardTitle { {text.profile.preferences} }
            }
            CardContent {
                div { class: "preference-row",
                    span {
                        Icon::<LdGlobe> { icon: LdGlobe, width: 18, height: 18 }
                        {text.profile.language}
                    }
                    div { class: "language-switch",
                        button {
                            class: if lang == Language::En { "lang-option active" } else { "lang-option" },
                            onclick: move |_| language.set(Language::En),
                            "English"
                        }
                        button {
                            class: if lang == Language::Ta { "lang-option active" } else { "lang-option" },
                            onclick: move |_| language.set(Language::Ta),
                            "தமிழ்"
                        }
                    }
                }
            }
        }

        Card { class: "session-card",
            CardHeader {
                CardTitle { {text.profile.account_session} }
                CardDescription { {text.profile.session_sub} }
            }
            CardContent {
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| async move { sign_out(auth).await },
                    Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                    {text.profile.logout}
                }
            }
        }
    }
}
