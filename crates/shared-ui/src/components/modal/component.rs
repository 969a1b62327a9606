use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdX;
use dioxus_free_icons::Icon;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop or the
/// close button calls `on_close`; clicks inside the panel do not.
#[component]
pub fn Modal(
    open: bool,
    title: String,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-panel",
                role: "dialog",
                "aria-modal": "true",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h3 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        Icon::<LdX> { icon: LdX, width: 18, height: 18 }
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_modal_renders_nothing() {
        let html = dioxus_ssr::render_element(rsx! {
            Modal { open: false, title: "Share", on_close: |_| {}, "hidden body" }
        });
        assert!(!html.contains("hidden body"));
    }

    #[test]
    fn open_modal_shows_title_and_body() {
        let html = dioxus_ssr::render_element(rsx! {
            Modal { open: true, title: "Share Location", on_close: |_| {}, p { "body" } }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Share Location"));
        assert!(html.contains("<p>body</p>"));
    }
}
