use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Every field defaults to `false` so a missing or incomplete config file
/// runs the app fully offline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
    /// Mirror logins and bills to the spreadsheet macro.
    #[serde(default)]
    pub sheet_sync: bool,
    /// Receipt analysis and SEO suggestions.
    #[serde(default)]
    pub gemini: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetConfig {
    /// Apps Script macro endpoint. `SHEET_URL` overrides it.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_gemini_base")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_gemini_base(),
        }
    }
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_gemini_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftConfig {
    #[serde(default = "default_otp_ttl")]
    pub otp_ttl_secs: i64,
    #[serde(default = "default_regen_tick")]
    pub regen_tick_secs: u64,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            otp_ttl_secs: default_otp_ttl(),
            regen_tick_secs: default_regen_tick(),
        }
    }
}

fn default_otp_ttl() -> i64 {
    120
}

fn default_regen_tick() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_login_max")]
    pub login_max_attempts: usize,
    #[serde(default = "default_login_window")]
    pub login_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_max_attempts: default_login_max(),
            login_window_secs: default_login_window(),
        }
    }
}

fn default_login_max() -> usize {
    10
}

fn default_login_window() -> u64 {
    60
}

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub shifts: ShiftConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}
