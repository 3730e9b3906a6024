//! Magnification and placement.
//!
//! The whole page is drawn at a single magnification factor picked from
//! the largest texture: small atlases are shown at 2x, anything wider than
//! 512 or taller than 256 at 1x, so the viewport never has to exceed a
//! 1024x512 physical budget. Every element is then placed by scaling its
//! atlas coordinates by that factor.

use crate::model::{MarkerData, TextureEntry, format_num};
use smallvec::SmallVec;

/// Sizes every texture is assumed to reach, even when the list is smaller.
pub const MIN_EXTENT: (f64, f64) = (256.0, 256.0);

/// Largest atlas that is still drawn at 2x.
pub const DOUBLE_LIMIT: (f64, f64) = (512.0, 256.0);

/// Half of the point marker's diameter; points are centered on their spot.
const POINT_RADIUS: &str = "0.85em";

/// The layout decision made once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPlan {
    /// 1 or 2. Constant for the lifetime of the page.
    pub factor: f64,
    /// Stretched viewport width, `None` keeps the stylesheet default.
    pub display_width: Option<f64>,
    /// Width of the frame around the viewport (viewport + margin).
    pub area_width: Option<f64>,
}

impl DisplayPlan {
    /// Scale an atlas length to page pixels.
    pub fn scale(&self, v: f64) -> f64 {
        self.factor * v
    }
}

/// Pick the magnification factor and viewport size for a set of textures.
///
/// `display_margin` is the margin + padding of the viewport, added to get
/// the width of its frame.
pub fn compute_magnification(textures: &[TextureEntry], display_margin: f64) -> DisplayPlan {
    let (max_w, max_h) = textures.iter().fold(MIN_EXTENT, |(mw, mh), tex| {
        (mw.max(tex.w), mh.max(tex.h))
    });

    let (factor, threshold) = if max_w <= DOUBLE_LIMIT.0 && max_h <= DOUBLE_LIMIT.1 {
        (2.0, MIN_EXTENT.0)
    } else {
        (1.0, DOUBLE_LIMIT.0)
    };

    let display_width = (max_w > threshold).then_some(max_w * factor);
    let plan = DisplayPlan {
        factor,
        display_width,
        area_width: display_width.map(|w| w + display_margin),
    };
    log::debug!(
        "magnification x{} for max extent {}x{} (viewport {:?})",
        plan.factor,
        max_w,
        max_h,
        plan.display_width
    );
    plan
}

// ─── Placement ───────────────────────────────────────────────────────────

/// Ordered CSS property assignments for one node.
pub type Placement = SmallVec<[(&'static str, String); 6]>;

pub(crate) fn px(v: f64) -> String {
    format!("{}px", format_num(v))
}

/// Size of the `<img>` inside a texture wrapper.
pub fn texture_image_size(tex: &TextureEntry, plan: &DisplayPlan) -> Placement {
    let mut out = Placement::new();
    out.push(("width", px(plan.scale(tex.w))));
    out.push(("height", px(plan.scale(tex.h))));
    out
}

/// Stacking order, applied to every element regardless of kind.
pub fn z_order(data: &MarkerData) -> Placement {
    let mut out = Placement::new();
    out.push(("z-index", format_num(data.z_index)));
    out
}

/// Point markers are centered on their coordinate.
pub fn point_placement(data: &MarkerData, plan: &DisplayPlan) -> Placement {
    let mut out = Placement::new();
    out.push((
        "left",
        format!("calc({} - {POINT_RADIUS})", px(plan.scale(data.x))),
    ));
    out.push((
        "top",
        format!("calc({} - {POINT_RADIUS})", px(plan.scale(data.y))),
    ));
    out.push(("background-color", data.color.clone()));
    out
}

/// Patches, clippable patches and grids: a colored box at the upper left.
pub fn area_placement(data: &MarkerData, plan: &DisplayPlan) -> Placement {
    let mut out = Placement::new();
    out.push(("left", px(plan.scale(data.x))));
    out.push(("top", px(plan.scale(data.y))));
    out.push(("border-color", data.color.clone()));
    out.push(("color", data.color.clone()));
    out.push(("width", px(plan.scale(data.w))));
    out.push(("height", px(plan.scale(data.h))));
    out
}

/// Grids span `grid_x` by `grid_y` clips; overrides the area size.
pub fn grid_size(data: &MarkerData, plan: &DisplayPlan) -> Placement {
    let mut out = Placement::new();
    out.push(("width", px(plan.scale(data.clip_w * data.grid_x))));
    out.push(("height", px(plan.scale(data.clip_h * data.grid_y))));
    out
}
