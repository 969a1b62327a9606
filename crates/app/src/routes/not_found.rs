use dioxus::prelude::*;

use crate::routes::Route;

/// Unknown paths land back on the home page. The card only shows for the
/// moment before the redirect applies, or when scripting is off.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    use_effect(move || {
        navigator().replace(Route::Home {});
    });

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                p { class: "not-found-message",
                    "The page "
                    code { "{path}" }
                    " could not be found."
                }
                Link { to: Route::Home {}, class: "not-found-link", "Back to Home" }
            }
        }
    }
}
