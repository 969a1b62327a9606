use dioxus::prelude::*;

/// Accent colour of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Positive,
    Attention,
    Critical,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "neutral",
            StatTone::Positive => "positive",
            StatTone::Attention => "attention",
            StatTone::Critical => "critical",
        }
    }
}

/// One headline number with its label. `children` is the icon slot.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] tone: StatTone,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let clickable = onclick.is_some();
    rsx! {
        div {
            class: "stat-card",
            "data-tone": tone.class(),
            "data-clickable": if clickable { "true" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            div { class: "stat-card-icon", {children} }
            div { class: "stat-card-body",
                span { class: "stat-card-value", "{value}" }
                span { class: "stat-card-label", "{label}" }
            }
        }
    }
}
