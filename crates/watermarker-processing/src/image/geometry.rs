//! Watermark sizing.
//!
//! The watermark keeps its own aspect ratio and is bounded by a `size_ratio`
//! fraction of the base image along whichever axis constrains it first.

use crate::error::WatermarkError;

/// Integer pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Height over width
    fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Exact scaled watermark size before rounding to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSize {
    pub width: f64,
    pub height: f64,
}

impl ScaledSize {
    /// Round to whole pixels. Never yields a zero side.
    pub fn to_dimensions(self) -> Dimensions {
        let round = |v: f64| (v.round() as u32).max(1);
        Dimensions {
            width: round(self.width),
            height: round(self.height),
        }
    }
}

/// Compute the scaled watermark size.
///
/// When the base is relatively wider than the watermark (its height/width is
/// smaller), height is the limiting side: `height = size_ratio * base.height`
/// and width follows from the watermark's aspect ratio. Otherwise width is
/// bounded by `size_ratio * base.width`.
pub fn compute_watermark_dimensions(
    base: Dimensions,
    watermark: Dimensions,
    size_ratio: f64,
) -> Result<ScaledSize, WatermarkError> {
    if base.is_empty() {
        return Err(WatermarkError::InvalidDimensions(format!(
            "base image is {}x{}",
            base.width, base.height
        )));
    }
    if watermark.is_empty() {
        return Err(WatermarkError::InvalidDimensions(format!(
            "watermark image is {}x{}",
            watermark.width, watermark.height
        )));
    }
    if !size_ratio.is_finite() || size_ratio <= 0.0 || size_ratio > 1.0 {
        return Err(WatermarkError::InvalidDimensions(format!(
            "size ratio {} is outside (0, 1]",
            size_ratio
        )));
    }

    let (wm_width, wm_height) = (watermark.width as f64, watermark.height as f64);

    let size = if base.aspect() < watermark.aspect() {
        let height = size_ratio * base.height as f64;
        ScaledSize {
            width: height / wm_height * wm_width,
            height,
        }
    } else {
        let width = size_ratio * base.width as f64;
        ScaledSize {
            width,
            height: width / wm_width * wm_height,
        }
    };

    Ok(size)
}
