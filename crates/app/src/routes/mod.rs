pub mod bills;
pub mod campaigns;
pub mod employee;
pub mod home;
pub mod location;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod reports;
pub mod users;

use crate::auth::{sign_out, use_auth};
use crate::i18n::{use_language, use_strings};
use crate::live::{LiveSync, Workspace};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdFileText, LdLayoutDashboard, LdLogOut, LdMapPin, LdMegaphone, LdReceipt, LdShieldAlert,
    LdUser, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{can_access, visible_nav, Language, NavItem};
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

use bills::Bills;
use campaigns::Campaigns;
use employee::EmployeeHistory;
use home::Home;
use location::Location;
use login::Login;
use not_found::NotFound;
use profile::Profile;
use reports::Reports;
use users::Users;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/employee")]
    EmployeeHistory {},
    #[route("/location?:lat&:lng&:name")]
    Location {
        lat: Option<String>,
        lng: Option<String>,
        name: Option<String>,
    },
    #[route("/bills")]
    Bills {},
    #[route("/campaigns")]
    Campaigns {},
    #[route("/users")]
    Users {},
    #[route("/reports")]
    Reports {},
    #[route("/profile")]
    Profile {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Route for a navigation entry.
pub fn nav_route(item: NavItem) -> Route {
    match item {
        NavItem::Home => Route::Home {},
        NavItem::Location => Route::Location {
            lat: None,
            lng: None,
            name: None,
        },
        NavItem::Bills => Route::Bills {},
        NavItem::Campaigns => Route::Campaigns {},
        NavItem::Users => Route::Users {},
        NavItem::Reports => Route::Reports {},
        NavItem::Profile => Route::Profile {},
    }
}

/// The navigation entry a route belongs to, for highlighting and role
/// gating. Session history counts as part of Home.
pub fn route_nav_item(route: &Route) -> Option<NavItem> {
    match route {
        Route::Home {} | Route::EmployeeHistory {} => Some(NavItem::Home),
        Route::Location { .. } => Some(NavItem::Location),
        Route::Bills {} => Some(NavItem::Bills),
        Route::Campaigns {} => Some(NavItem::Campaigns),
        Route::Users {} => Some(NavItem::Users),
        Route::Reports {} => Some(NavItem::Reports),
        Route::Profile {} => Some(NavItem::Profile),
        Route::Login {} | Route::NotFound { .. } => None,
    }
}

fn nav_icon(item: NavItem) -> Element {
    match item {
        NavItem::Home => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        NavItem::Location => rsx! { Icon::<LdMapPin> { icon: LdMapPin, width: 18, height: 18 } },
        NavItem::Bills => rsx! { Icon::<LdReceipt> { icon: LdReceipt, width: 18, height: 18 } },
        NavItem::Campaigns => rsx! { Icon::<LdMegaphone> { icon: LdMegaphone, width: 18, height: 18 } },
        NavItem::Users => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        NavItem::Reports => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        NavItem::Profile => rsx! { Icon::<LdUser> { icon: LdUser, width: 18, height: 18 } },
    }
}

/// Auth guard layout; redirects to /login when there is no session.
///
/// Uses `use_server_future` with `?` so SSR suspends until the session
/// check completes and hydration reuses the embedded result.
#[component]
fn AuthGuard() -> Element {
    let mut auth = use_auth();

    let resource = use_server_future(move || async move { server::api::current_user().await })?;
    let result = resource.read().as_ref().cloned();

    match result {
        Some(Ok(Some(user))) => {
            if !auth.is_authenticated() {
                auth.set_user(user);
            }
            rsx! { Outlet::<Route> {} }
        }
        Some(Ok(None)) | Some(Err(_)) => {
            auth.clear_auth();
            navigator().push(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        None => {
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            }
        }
    }
}

/// Main app layout: sidebar navigation filtered by role, a top bar with
/// the language switch, and the live sync worker.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let mut language = use_language();
    let text = use_strings();
    let lang = *language.language.read();

    let mut workspace = use_context_provider(Workspace::new);
    let initial = use_server_future(move || async move { server::api::get_snapshot().await })?;
    if workspace.snapshot.peek().is_none() {
        if let Some(Ok(snapshot)) = initial.read().as_ref() {
            workspace.snapshot.set(Some(snapshot.clone()));
        }
    }

    let user = auth.current_user.read().clone();
    let role = auth.role();
    let current = route_nav_item(&route);
    let allowed = current.is_none_or(|item| can_access(role, item));

    rsx! {
        LiveSync {}
        div { class: "app-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    span { class: "sidebar-brand-mark", "SS" }
                    span { class: "sidebar-brand-name", "SS Technologies" }
                }
                nav { class: "sidebar-nav",
                    for item in visible_nav(role) {
                        Link {
                            key: "{item.path()}",
                            to: nav_route(item),
                            class: if current == Some(item) { "sidebar-link active" } else { "sidebar-link" },
                            {nav_icon(item)}
                            span { {item.label(lang)} }
                        }
                    }
                }
                button {
                    class: "sidebar-link sidebar-logout",
                    onclick: move |_| async move { sign_out(auth).await },
                    Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                    span { {text.logout} }
                }
            }
            div { class: "app-main",
                header { class: "topbar",
                    div { class: "topbar-user",
                        if let Some(user) = user.as_ref() {
                            img { class: "avatar", src: "{user.avatar}", alt: "{user.initial()}" }
                            div {
                                p { class: "topbar-name", "{user.name}" }
                                p { class: "topbar-designation", "{user.designation}" }
                            }
                            if role.is_owner() {
                                Badge { variant: BadgeVariant::Primary, "OWNER" }
                            }
                        }
                    }
                    div { class: "language-switch",
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
                }
                main { class: "app-content",
                    if allowed {
                        Outlet::<Route> {}
                    } else {
                        AccessRestricted {}
                    }
                }
            }
        }
    }
}

#[component]
fn AccessRestricted() -> Element {
    rsx! {
        Card { class: "restricted-card",
            CardHeader {
                Icon::<LdShieldAlert> { icon: LdShieldAlert, width: 28, height: 28 }
                CardTitle { "Access restricted" }
                CardDescription { "This area is reserved for the workspace owner." }
            }
            CardContent {
                Link { to: Route::Home {}, class: "button button-outline", "Back to Home" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::UserRole;

    #[test]
    fn nav_routes_match_nav_paths() {
        for item in NavItem::ALL {
            let url = nav_route(item).to_string();
            assert_eq!(url.split('?').next(), Some(item.path()));
            assert_eq!(route_nav_item(&nav_route(item)), Some(item));
        }
    }

    #[test]
    fn session_history_sits_under_home() {
        assert_eq!(route_nav_item(&Route::EmployeeHistory {}), Some(NavItem::Home));
        assert_eq!(route_nav_item(&Route::Login {}), None);
    }

    #[test]
    fn employees_are_kept_out_of_owner_pages() {
        let users = route_nav_item(&Route::Users {}).unwrap();
        let reports = route_nav_item(&Route::Reports {}).unwrap();
        assert!(!can_access(UserRole::Employee, users));
        assert!(!can_access(UserRole::Employee, reports));
        assert!(can_access(UserRole::Owner, reports));
    }

    #[test]
    fn location_focus_round_trips_through_the_url() {
        let route = Route::Location {
            lat: Some("12.97".into()),
            lng: Some("77.59".into()),
            name: Some("Sarah".into()),
        };
        let parsed: Route = route.to_string().parse().unwrap();
        assert_eq!(parsed, route);
    }
}
