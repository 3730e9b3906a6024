//! Data model embedded in the viewer page.
//!
//! The generator writes one JSON object per node into its `data` attribute:
//! texture wrappers (`.texwrap`) carry `{path, w, h}`, annotated elements
//! (`.element`) carry their marker coordinates. Everything is parsed
//! leniently: absent fields fall back to zero or an empty string.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// Attribute holding the JSON payload on every texture and element node.
pub const DATA_ATTR: &str = "data";

// ─── Textures ────────────────────────────────────────────────────────────

/// One texture of the atlas, shown as a scaled `<img>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureEntry {
    pub path: String,
    pub w: f64,
    pub h: f64,
}

// ─── Markers ─────────────────────────────────────────────────────────────

/// Coordinates and presentation fields of an annotated element.
///
/// Which fields are meaningful depends on the [`MarkerKind`]; the rest stay
/// at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerData {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub clip_w: f64,
    pub clip_h: f64,
    pub grid_x: f64,
    pub grid_y: f64,
    pub z_index: f64,
    pub color: String,
    pub direction: String,
    pub suffix: String,
}

/// The kind of an annotated element, read from its class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Point,
    Patch,
    ClippablePatch,
    Grid,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::Point,
        MarkerKind::Patch,
        MarkerKind::ClippablePatch,
        MarkerKind::Grid,
    ];

    /// The class token identifying this kind.
    pub fn class(self) -> &'static str {
        match self {
            MarkerKind::Point => "point",
            MarkerKind::Patch => "patch",
            MarkerKind::ClippablePatch => "cpatch",
            MarkerKind::Grid => "grid",
        }
    }

    /// Classify a node from its class tokens.
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut found = None;
        for token in classes {
            let kind = match token {
                "point" => MarkerKind::Point,
                "patch" => MarkerKind::Patch,
                "cpatch" => MarkerKind::ClippablePatch,
                "grid" => MarkerKind::Grid,
                _ => continue,
            };
            // grid wins over any other kind token
            if found.is_none() || kind == MarkerKind::Grid {
                found = Some(kind);
            }
        }
        found
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────

/// Parse a `data` attribute payload.
///
/// # Errors
/// Returns the JSON error message if the payload is not a JSON object of the
/// expected shape.
pub fn parse_data<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|e| format!("bad data attribute: {e}"))
}

/// Parse a payload, logging and falling back to the default record on error.
/// A missing attribute is treated like an empty object.
pub fn parse_data_or_default<T: DeserializeOwned + Default>(raw: Option<&str>) -> T {
    let Some(raw) = raw else {
        return T::default();
    };
    match parse_data(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{e}; using defaults");
            T::default()
        }
    }
}

/// Format a number the way the page prints it: integers without a
/// fractional part, everything else unrounded.
pub fn format_num(n: f64) -> String {
    if n == 0.0 {
        // also folds -0
        "0".to_string()
    } else {
        format!("{n}")
    }
}
