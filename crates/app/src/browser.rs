//! Browser APIs reached through `document::eval`: geolocation, timers and
//! the clipboard. Every call degrades quietly when the API is missing or
//! permission is denied.

use dioxus::prelude::*;
use shared_types::Coordinates;

const CURRENT_POSITION_JS: &str = r#"
return await new Promise((resolve) => {
    if (!navigator.geolocation) { resolve(null); return; }
    navigator.geolocation.getCurrentPosition(
        (p) => resolve({ lat: p.coords.latitude, lng: p.coords.longitude }),
        () => resolve(null),
        { enableHighAccuracy: true, timeout: 10000 }
    );
});
"#;

const WATCH_POSITION_JS: &str = r#"
if (!navigator.geolocation) { return; }
if (window.__workforceWatch !== undefined) {
    navigator.geolocation.clearWatch(window.__workforceWatch);
}
window.__workforceWatch = navigator.geolocation.watchPosition(
    (p) => dioxus.send({ lat: p.coords.latitude, lng: p.coords.longitude }),
    () => {},
    { enableHighAccuracy: true, maximumAge: 10000 }
);
await new Promise(() => {});
"#;

const CLEAR_WATCH_JS: &str = r#"
if (navigator.geolocation && window.__workforceWatch !== undefined) {
    navigator.geolocation.clearWatch(window.__workforceWatch);
    window.__workforceWatch = undefined;
}
"#;

/// One position fix, or `None` when geolocation is unavailable or denied.
pub async fn current_position() -> Option<Coordinates> {
    match document::eval(CURRENT_POSITION_JS)
        .join::<Option<Coordinates>>()
        .await
    {
        Ok(position) => position,
        Err(e) => {
            tracing::debug!(error = ?e, "Geolocation unavailable");
            None
        }
    }
}

/// A running `watchPosition` subscription. Only one watch is live at a time.
pub struct PositionWatch {
    eval: document::Eval,
}

impl PositionWatch {
    /// The next fix. `None` once the watch has ended.
    pub async fn next(&mut self) -> Option<Coordinates> {
        self.eval.recv::<Coordinates>().await.ok()
    }
}

pub fn watch_position() -> PositionWatch {
    PositionWatch {
        eval: document::eval(WATCH_POSITION_JS),
    }
}

pub fn clear_watch() {
    document::eval(CLEAR_WATCH_JS);
}

pub async fn sleep_ms(ms: u64) {
    let js = format!("await new Promise((r) => setTimeout(r, {ms})); return null;");
    let _ = document::eval(&js).await;
}

pub fn copy_to_clipboard(text: &str) {
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    document::eval(&format!(
        "if (navigator.clipboard) {{ navigator.clipboard.writeText({quoted}); }}"
    ));
}
