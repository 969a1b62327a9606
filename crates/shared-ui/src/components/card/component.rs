use dioxus::prelude::*;

/// Base class first, caller attributes merged over it.
fn surface(class: &'static str, attributes: Vec<Attribute>) -> Vec<Attribute> {
    dioxus_primitives::merge_attributes(vec![
        vec![Attribute::new("class", class, None, false)],
        attributes,
    ])
}

/// Rounded surface that groups related content.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card", attributes);
    rsx! {
        div { ..merged, {children} }
    }
}

#[component]
pub fn CardHeader(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card-header", attributes);
    rsx! {
        div { ..merged, {children} }
    }
}

#[component]
pub fn CardTitle(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card-title", attributes);
    rsx! {
        h3 { ..merged, {children} }
    }
}

#[component]
pub fn CardDescription(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card-description", attributes);
    rsx! {
        p { ..merged, {children} }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card-content", attributes);
    rsx! {
        div { ..merged, {children} }
    }
}

#[component]
pub fn CardFooter(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = surface("card-footer", attributes);
    rsx! {
        div { ..merged, {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_classes_merge_with_base() {
        let html = dioxus_ssr::render_element(rsx! {
            Card { class: "auth-card",
                CardHeader { CardTitle { "Sign In" } }
                CardContent { "body" }
            }
        });
        assert!(html.contains("auth-card"));
        assert!(html.contains("card-title"));
        assert!(html.contains("Sign In"));
        assert!(html.contains("class=\"card-content\""));
    }
}
