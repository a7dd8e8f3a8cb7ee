//! Watermark anchoring.
//!
//! Maps one of nine named anchors plus padding to the top-left pixel offset
//! of the watermark in base-image coordinates.

use crate::image::geometry::Dimensions;

/// Named placement of the watermark relative to the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    /// Parse an anchor name. Unknown names resolve to [`Anchor::Center`].
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "top-left" | "north-west" => Anchor::TopLeft,
            "top" | "top-center" | "north" => Anchor::Top,
            "top-right" | "north-east" => Anchor::TopRight,
            "left" | "center-left" | "west" => Anchor::Left,
            "right" | "center-right" | "east" => Anchor::Right,
            "bottom-left" | "south-west" => Anchor::BottomLeft,
            "bottom" | "bottom-center" | "south" => Anchor::Bottom,
            "bottom-right" | "south-east" => Anchor::BottomRight,
            // "center", "middle" and anything unrecognized
            _ => Anchor::Center,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::Top => "top",
            Anchor::TopRight => "top-right",
            Anchor::Left => "left",
            Anchor::Center => "center",
            Anchor::Right => "right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::Bottom => "bottom",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-left position of the watermark. May be negative or past the base edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

impl Offset {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Compute the watermark offset for `anchor`. The result is not clamped.
pub fn compute_offset(
    base: Dimensions,
    watermark: Dimensions,
    anchor: Anchor,
    padding: u32,
) -> Offset {
    let (base_w, base_h) = (base.width as i64, base.height as i64);
    let (wm_w, wm_h) = (watermark.width as i64, watermark.height as i64);
    let p = padding as i64;

    let start = p;
    let center_x = half_rounded(base_w - wm_w);
    let center_y = half_rounded(base_h - wm_h);
    let end_x = base_w - wm_w - p;
    let end_y = base_h - wm_h - p;

    let (x, y) = match anchor {
        Anchor::TopLeft => (start, start),
        Anchor::Top => (center_x, start),
        Anchor::TopRight => (end_x, start),
        Anchor::Left => (start, center_y),
        Anchor::Center => (center_x, center_y),
        Anchor::Right => (end_x, center_y),
        Anchor::BottomLeft => (start, end_y),
        Anchor::Bottom => (center_x, end_y),
        Anchor::BottomRight => (end_x, end_y),
    };

    Offset { x, y }
}

/// `n / 2` rounded half toward positive infinity.
fn half_rounded(n: i64) -> i64 {
    (n + 1).div_euclid(2)
}
