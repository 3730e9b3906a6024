//! Viewer configuration.
//!
//! Every field has a default matching the stock page template, so a page
//! only needs to pass the values it overrides.

use serde::Deserialize;

// ─── Config ───────────────────────────────────────────────────────────────

/// Element ids the viewer looks up in the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DomIds {
    /// Outer frame around the viewport.
    pub display_area: String,
    /// The viewport holding the texture wrappers.
    pub display: String,
    /// Side panel receiving marker details.
    pub info: String,
    /// Container for the group toggle buttons.
    pub button_field: String,
    /// Label showing the active texture path.
    pub name_frame: String,
    pub prev: String,
    pub next: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            display_area: "displayarea".into(),
            display: "display".into(),
            info: "info".into(),
            button_field: "buttonfield".into(),
            name_frame: "texnameframe".into(),
            prev: "texprev".into(),
            next: "texnext".into(),
        }
    }
}

/// Configuration for [`crate::viewer::Viewer`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// How long a copied region shows its placeholder, in ms. Default: **250**.
    pub cooldown_ms: u32,
    /// Texture paths longer than this are truncated. Default: **35**.
    pub name_limit: usize,
    /// Member counts above this show an ellipsis badge. Default: **9**.
    pub badge_limit: usize,
    /// Margin plus padding around the viewport, in px. Default: **48**.
    pub display_margin: f64,
    /// Max `log` level for the console logger. Default: **"info"**.
    pub log_level: String,
    pub ids: DomIds,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: crate::copy::DEFAULT_COOLDOWN_MS,
            name_limit: 35,
            badge_limit: 9,
            display_margin: 48.0,
            log_level: "info".into(),
            ids: DomIds::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a config from JSON, keeping defaults for omitted fields.
    ///
    /// # Errors
    /// Returns the JSON error message for malformed input.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("bad viewer config: {e}"))
    }

    /// The configured log level, `Info` when unrecognized.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
