use bytes::Bytes;
use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::compression::{ImageEncoder, OutputFormat};
use crate::error::WatermarkError;
use crate::image::anchor::compute_offset;
use crate::image::compositor::composite;
use crate::image::geometry::{compute_watermark_dimensions, Dimensions};
use crate::params::PlacementConfig;

/// Result of [`apply_watermark`]
#[derive(Debug, Clone)]
pub struct WatermarkOutput {
    /// Composited pixels, before encoding
    pub image: RgbaImage,
    /// `image` encoded as `format`
    pub bytes: Bytes,
    pub format: OutputFormat,
}

/// Composite `watermark` onto `base` and encode the result.
///
/// Sizing, placement, blending and encoding all follow `config`. Nothing is
/// retained between calls.
pub fn apply_watermark(
    base: &DynamicImage,
    watermark: &DynamicImage,
    config: &PlacementConfig,
) -> Result<WatermarkOutput, WatermarkError> {
    let base_dims = Dimensions::from(base.dimensions());
    let wm_dims = Dimensions::from(watermark.dimensions());

    let scaled = compute_watermark_dimensions(base_dims, wm_dims, config.size_ratio)?;
    let target = scaled.to_dimensions();
    let offset = compute_offset(base_dims, target, config.anchor, config.padding);

    tracing::debug!(
        base_width = base_dims.width,
        base_height = base_dims.height,
        watermark_width = target.width,
        watermark_height = target.height,
        x = offset.x,
        y = offset.y,
        anchor = %config.anchor,
        "Placing watermark"
    );

    let image = composite(
        &base.to_rgba8(),
        &watermark.to_rgba8(),
        target,
        offset,
        config.opacity,
        config.blur_radius,
    )?;

    let bytes = ImageEncoder::encode(&image, config.output_format, config.quality)?;

    Ok(WatermarkOutput {
        image,
        bytes,
        format: config.output_format,
    })
}
