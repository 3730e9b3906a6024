//! Info panel content for a clicked marker.
//!
//! The panel shows which element and marker was clicked, then one line per
//! coordinate field. Each value sits in a copyable region. The output is a
//! pure function of the marker, so clicking the same marker twice renders
//! the same text.

use crate::model::{MarkerData, MarkerKind, format_num};
use std::fmt::Write;

/// Class carried by every region that copies its text on click.
pub const COPYABLE_CLASS: &str = "canbecopied";

/// Separator between the element name and the marker name in node ids.
const ID_SEPARATOR: &str = "--";

/// How a copyable value is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    Coord,
    Text,
}

impl ValueStyle {
    fn class(self) -> &'static str {
        match self {
            ValueStyle::Coord => "infocoord",
            ValueStyle::Text => "infostring",
        }
    }
}

/// One labelled value of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
    pub style: ValueStyle,
}

impl InfoField {
    fn coord(label: &'static str, a: f64, b: f64) -> Self {
        Self {
            label,
            value: format!("{}, {}", format_num(a), format_num(b)),
            style: ValueStyle::Coord,
        }
    }

    fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            style: ValueStyle::Text,
        }
    }
}

/// The fields shown for a marker, in display order.
pub fn info_fields(kind: MarkerKind, data: &MarkerData) -> Vec<InfoField> {
    match kind {
        MarkerKind::Point => vec![InfoField::coord("POSITION", data.x, data.y)],
        MarkerKind::Patch => vec![
            InfoField::coord("UPPER-LEFT", data.x, data.y),
            InfoField::coord("SIZE", data.w, data.h),
        ],
        MarkerKind::ClippablePatch => vec![
            InfoField::coord("UPPER-LEFT", data.x, data.y),
            InfoField::coord("SIZE", data.w, data.h),
            InfoField::text("DIRECTION", &data.direction),
        ],
        MarkerKind::Grid => vec![
            InfoField::coord("UPPER-LEFT", data.x, data.y),
            InfoField::coord("SIZE OF EACH CLIP", data.clip_w, data.clip_h),
            InfoField::coord("CLIP NUMBERS ALONG AXES", data.grid_x, data.grid_y),
        ],
    }
}

/// Header naming the marker: its symbol in brackets, then the element name
/// and, when the id has one, the marker name.
pub fn render_header(node_id: &str, symbol: &str) -> String {
    let mut out = format!(r#"<span class="markername">[{symbol}]</span> "#);
    let mut segs = node_id.split(ID_SEPARATOR);
    let element = segs.next().unwrap_or_default();
    match segs.next() {
        None => {
            let _ = write!(out, r#"<span class="pyelname">{element}</span>"#);
        }
        Some(marker) => {
            let _ = write!(
                out,
                r#"<span class="pyelname">{element}<span class="pymarkername">/{marker}</span></span>"#
            );
        }
    }
    out
}

/// A value wrapped in its copyable region.
pub fn render_copyable(value: &str, style: ValueStyle) -> String {
    format!(
        r#"<div class="{} {COPYABLE_CLASS}">{value}</div>"#,
        style.class()
    )
}

/// Full panel markup for a marker; replaces the previous content entirely.
pub fn render_info(node_id: &str, symbol: &str, kind: MarkerKind, data: &MarkerData) -> String {
    let mut out = render_header(node_id, symbol);
    for field in info_fields(kind, data) {
        let _ = write!(
            out,
            "\n<u>{}</u> = {}",
            field.label,
            render_copyable(&field.value, field.style)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_with_marker_name() {
        assert_eq!(
            render_header("fuel_slot--area", "甲"),
            concat!(
                r#"<span class="markername">[甲]</span> "#,
                r#"<span class="pyelname">fuel_slot<span class="pymarkername">/area</span></span>"#
            )
        );
    }

    #[test]
    fn header_without_marker_name() {
        assert_eq!(
            render_header("corner", "a"),
            r#"<span class="markername">[a]</span> <span class="pyelname">corner</span>"#
        );
    }

    #[test]
    fn point_info() {
        let data = MarkerData {
            x: 56.0,
            y: 17.0,
            ..MarkerData::default()
        };
        assert_eq!(
            render_info("input--at", "乙", MarkerKind::Point, &data),
            concat!(
                r#"<span class="markername">[乙]</span> "#,
                r#"<span class="pyelname">input<span class="pymarkername">/at</span></span>"#,
                "\n<u>POSITION</u> = ",
                r#"<div class="infocoord canbecopied">56, 17</div>"#
            )
        );
    }

    #[test]
    fn clippable_patch_lists_direction_as_text() {
        let data = MarkerData {
            x: 79.0,
            y: 34.0,
            w: 24.0,
            h: 17.0,
            direction: "right".into(),
            ..MarkerData::default()
        };
        let fields = info_fields(MarkerKind::ClippablePatch, &data);
        let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["UPPER-LEFT", "SIZE", "DIRECTION"]);
        assert_eq!(fields[1].value, "24, 17");
        assert_eq!(fields[2].style, ValueStyle::Text);
        let html = render_info("arrow--area", "丙", MarkerKind::ClippablePatch, &data);
        assert!(html.ends_with(r#"<u>DIRECTION</u> = <div class="infostring canbecopied">right</div>"#));
    }

    #[test]
    fn grid_info_lists_clip_and_counts() {
        let data = MarkerData {
            x: 8.0,
            y: 84.0,
            clip_w: 18.0,
            clip_h: 18.0,
            grid_x: 9.0,
            grid_y: 3.0,
            ..MarkerData::default()
        };
        let values: Vec<String> = info_fields(MarkerKind::Grid, &data)
            .into_iter()
            .map(|f| f.value)
            .collect();
        assert_eq!(values, vec!["8, 84", "18, 18", "9, 3"]);
    }

    #[test]
    fn rendering_is_idempotent() {
        let data = MarkerData {
            x: 1.0,
            y: 2.0,
            w: 3.0,
            h: 4.0,
            ..MarkerData::default()
        };
        let a = render_info("box--area", "x", MarkerKind::Patch, &data);
        let b = render_info("box--area", "x", MarkerKind::Patch, &data);
        assert_eq!(a, b);
        assert_eq!(a.matches(COPYABLE_CLASS).count(), 2);
    }
}
