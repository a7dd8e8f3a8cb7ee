//! Watermark compositing.
//!
//! Optionally blurs the base, scales the watermark, and draws it over the base
//! with the Porter-Duff "over" operator weighted by an opacity factor.

use image::{Rgba, RgbaImage};

use crate::error::WatermarkError;
use crate::image::anchor::Offset;
use crate::image::filters::ImageFilters;
use crate::image::geometry::Dimensions;
use crate::image::resize::ImageResize;

/// Composite `watermark` onto `base`, returning a new buffer.
///
/// The watermark is resized to `dims` and placed with its top-left corner at
/// `offset`. Watermark pixels falling outside the base are skipped.
pub fn composite(
    base: &RgbaImage,
    watermark: &RgbaImage,
    dims: Dimensions,
    offset: Offset,
    opacity: f32,
    blur_radius: Option<f32>,
) -> Result<RgbaImage, WatermarkError> {
    if dims.is_empty() {
        return Err(WatermarkError::CompositeError(format!(
            "target watermark size {}x{} is not positive",
            dims.width, dims.height
        )));
    }
    if !(0.0..=1.0).contains(&opacity) {
        return Err(WatermarkError::CompositeError(format!(
            "opacity {} is outside [0, 1]",
            opacity
        )));
    }

    let mut canvas = match blur_radius {
        Some(radius) if radius > 0.0 => ImageFilters::apply_blur(base, radius),
        _ => base.clone(),
    };

    let scaled = ImageResize::resize_exact(watermark.clone(), dims);
    blend_layer(&mut canvas, &scaled, offset, opacity);

    Ok(canvas)
}

fn blend_layer(target: &mut RgbaImage, layer: &RgbaImage, offset: Offset, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }

    let target_width = target.width() as i64;
    let target_height = target.height() as i64;

    // Visible region in target coordinates
    let x_start = offset.x.max(0);
    let y_start = offset.y.max(0);
    let x_end = (offset.x + layer.width() as i64).min(target_width);
    let y_end = (offset.y + layer.height() as i64).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wx = (tx - offset.x) as u32;
            let wy = (ty - offset.y) as u32;

            let src = *layer.get_pixel(wx, wy);
            let dst = target.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_pixels(*dst, src, opacity);
        }
    }
}

/// Blend `foreground` over `background` with an extra opacity factor.
///
/// With an opaque background this reduces to
/// `out = src * a + dst * (1 - a)` where `a = alpha_src * opacity`.
pub(crate) fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);

    if fg_alpha <= 0.0 {
        return background;
    }
    if fg_alpha >= 1.0 {
        return Rgba([foreground[0], foreground[1], foreground[2], 255]);
    }

    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
