use dioxus::prelude::*;

/// `m:ss`, clamped at zero.
pub fn countdown_label(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Time remaining on a one-time code, as text plus a shrinking bar.
///
/// The bar turns urgent in the last fifth of the window.
#[component]
pub fn Countdown(seconds_left: i64, total_seconds: i64) -> Element {
    let total = total_seconds.max(1);
    let left = seconds_left.clamp(0, total);
    let percent = left * 100 / total;
    let urgent = left * 5 <= total;

    rsx! {
        div { class: "countdown", "data-urgent": if urgent { "true" } else { "false" },
            span { class: "countdown-label", {countdown_label(left)} }
            div { class: "countdown-track",
                div { class: "countdown-bar", style: "width: {percent}%" }
            }
        }
    }
}
