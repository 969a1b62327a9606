use axum::extract::FromRef;
use shared_types::AppConfig;
use std::sync::OnceLock;

use crate::gemini::GeminiClient;
use crate::sheet::SheetClient;
use crate::store::{SharedWorkforce, Workforce};

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<SharedWorkforce>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub workforce: SharedWorkforce,
    pub sheet: Option<SheetClient>,
    pub gemini: Option<GeminiClient>,
}

impl AppState {
    pub fn new(workforce: SharedWorkforce, sheet: Option<SheetClient>, gemini: Option<GeminiClient>) -> Self {
        Self {
            workforce,
            sheet,
            gemini,
        }
    }

    /// Seeded workspace plus whichever integrations the config enables.
    pub fn from_config(config: &AppConfig, gemini_key: Option<String>) -> Self {
        let sheet = (config.features.sheet_sync && !config.sheet.url.is_empty())
            .then(|| SheetClient::new(config.sheet.url.clone()));
        let gemini = match (config.features.gemini, gemini_key) {
            (true, Some(key)) => Some(GeminiClient::new(&config.gemini, key)),
            (true, None) => {
                tracing::warn!("Gemini enabled but no API key set; AI features disabled");
                None
            }
            _ => None,
        };
        Self::new(Workforce::seeded(&config.shifts).shared(), sheet, gemini)
    }
}

static STATE: OnceLock<AppState> = OnceLock::new();

/// Process-wide state used by Dioxus server functions, built from the
/// loaded config on first use. REST handlers use `State<AppState>` instead.
pub fn get_state() -> &'static AppState {
    STATE.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let config = crate::config::load_config();
        AppState::from_config(config, crate::config::gemini_api_key())
    })
}
