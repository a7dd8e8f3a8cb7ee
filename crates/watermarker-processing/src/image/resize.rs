use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::image::geometry::Dimensions;

pub struct ImageResize;

impl ImageResize {
    /// Bicubic-equivalent filter used for watermark scaling
    pub const FILTER: FilterType = FilterType::CatmullRom;

    /// Resize to exact dimensions. Returns the input unchanged when it
    /// already has the target size.
    pub fn resize_exact(img: RgbaImage, target: Dimensions) -> RgbaImage {
        if img.dimensions() == (target.width, target.height) {
            return img;
        }

        tracing::debug!(
            from_width = img.width(),
            from_height = img.height(),
            to_width = target.width,
            to_height = target.height,
            "Resizing watermark"
        );
        imageops::resize(&img, target.width, target.height, Self::FILTER)
    }
}
