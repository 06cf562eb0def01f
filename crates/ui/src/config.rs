//! Page configuration
//!
//! Defaults match the stock page. A page may override some of them by
//! defining `window.FLASHCARDS_CONFIG` before the module loads:
//!
//! ```js
//! window.FLASHCARDS_CONFIG = { endpoint: "/generate", errorDisplayMs: 5000, logLevel: "debug" };
//! ```

use flashcards_protocol::GENERATE_PATH;
use tracing::Level;

const CONFIG_GLOBAL: &str = "FLASHCARDS_CONFIG";

/// Runtime settings for the upload page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Path the upload is posted to
    pub endpoint: String,
    /// How long an error banner stays up
    pub error_display_ms: u32,
    /// Entrance delay between consecutive cards
    pub card_stagger_ms: u32,
    /// Delay before the card container fades in
    pub container_fade_ms: u32,
    /// File label shown when nothing is selected
    pub file_placeholder: String,
    pub log_level: Level,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            endpoint: GENERATE_PATH.to_string(),
            error_display_ms: 5000,
            card_stagger_ms: 100,
            container_fade_ms: 50,
            file_placeholder: "Choose PDF or DOCX file".to_string(),
            log_level: Level::INFO,
        }
    }
}

impl UiConfig {
    /// Read overrides from `window.FLASHCARDS_CONFIG`, falling back to defaults
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let config = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()).unwrap_or_default();
        if config.is_undefined() || config.is_null() {
            web_sys::console::warn_1(
                &format!("{CONFIG_GLOBAL} not found, using default page settings").into(),
            );
            return Self::default();
        }

        let field = |name: &str| js_sys::Reflect::get(&config, &name.into()).ok();

        Self::default().with_overrides(
            field("endpoint").and_then(|v| v.as_string()),
            field("errorDisplayMs").and_then(|v| v.as_f64()),
            field("logLevel").and_then(|v| v.as_string()),
        )
    }

    /// Apply page-supplied overrides. Invalid values keep the current setting.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        error_display_ms: Option<f64>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(ms) = error_display_ms.filter(|ms| ms.is_finite() && *ms >= 0.0) {
            self.error_display_ms = ms.min(f64::from(u32::MAX)) as u32;
        }
        if let Some(level) = log_level.and_then(|l| l.parse::<Level>().ok()) {
            self.log_level = level;
        }
        self
    }
}
