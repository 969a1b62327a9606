use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml`, apply environment overrides, and store the result in
/// the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file yields the defaults, which run offline.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}, using defaults");
                AppConfig::default()
            }),
            Err(e) => {
                eprintln!("[config] {CONFIG_PATH} not found ({e}), using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        eprintln!("[config] Feature flags: {:?}", config.features);
        config
    })
}

/// `SHEET_URL` and `GEMINI_BASE_URL` replace the file values. Setting
/// `SHEET_URL` also switches sheet sync on.
fn apply_env_overrides(config: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("SHEET_URL").filter(|v| !v.trim().is_empty()) {
        config.sheet.url = url.trim().to_string();
        config.features.sheet_sync = true;
    }
    if let Some(base) = var("GEMINI_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.gemini.base_url = base.trim().to_string();
    }
    if var("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        config.features.telemetry = true;
    }
}

/// The loaded config, or defaults if `load_config()` hasn't run yet.
pub fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

/// Gemini key from `GEMINI_API_KEY`, falling back to `API_KEY`.
pub fn gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .ok()
        .filter(|k| !k.trim().is_empty())
}
