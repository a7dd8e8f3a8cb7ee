use image::RgbaImage;
use imageproc::filter::gaussian_blur_f32;

pub struct ImageFilters;

impl ImageFilters {
    /// Gaussian blur for a pixel `radius`, with `sigma = radius / 2` capped at
    /// the larger image dimension. A non-positive or non-finite radius returns
    /// a copy of the input.
    pub fn apply_blur(img: &RgbaImage, radius: f32) -> RgbaImage {
        if !radius.is_finite() || radius <= 0.0 {
            return img.clone();
        }

        let max_sigma = img.width().max(img.height()).max(1) as f32;
        let sigma = (radius / 2.0).min(max_sigma);

        tracing::debug!(radius = radius, sigma = sigma, "Blurring base image");
        gaussian_blur_f32(img, sigma)
    }
}
