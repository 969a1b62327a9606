use dioxus::prelude::*;

/// Visual variant for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Destructive,
    Outline,
    Ghost,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Success => "success",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Ghost => "ghost",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(default)]
    pub variant: ButtonVariant,
    #[props(default = false)]
    pub disabled: bool,
    /// Render as a form submit button.
    #[props(default = false)]
    pub submit: bool,
    #[props(default)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = vec![
        Attribute::new("class", "button", None, false),
        Attribute::new("data-style", props.variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);
    let kind = if props.submit { "submit" } else { "button" };

    rsx! {
        button {
            r#type: kind,
            disabled: props.disabled,
            onclick: move |evt| {
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            ..merged,
            {props.children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_buttons_carry_type_and_variant() {
        let html = dioxus_ssr::render_element(rsx! {
            Button { variant: ButtonVariant::Destructive, submit: true, disabled: true, "Deny" }
        });
        assert!(html.contains("type=\"submit\""));
        assert!(html.contains("data-style=\"destructive\""));
        assert!(html.contains("disabled"));
        assert!(html.contains("Deny"));
    }

    #[test]
    fn plain_buttons_do_not_submit() {
        let html = dioxus_ssr::render_element(rsx! {
            Button { "Cancel" }
        });
        assert!(html.contains("type=\"button\""));
        assert!(html.contains("data-style=\"primary\""));
    }
}
