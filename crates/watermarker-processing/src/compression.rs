use bytes::Bytes;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::error::WatermarkError;

/// Output container format for the watermarked image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    WebP,
    Avif,
    Gif,
    Bmp,
    Tiff,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, WatermarkError> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::WebP),
            "avif" => Ok(OutputFormat::Avif),
            "gif" => Ok(OutputFormat::Gif),
            "bmp" => Ok(OutputFormat::Bmp),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            _ => Err(WatermarkError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn to_mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Avif => "image/avif",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Bmp => "image/bmp",
            OutputFormat::Tiff => "image/tiff",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
            OutputFormat::Gif => "gif",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
            OutputFormat::Gif => "gif",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializes composited buffers
pub struct ImageEncoder;

impl ImageEncoder {
    /// Encode `img` as `format`. `quality` must be in 1..=100 and only
    /// affects lossy formats.
    pub fn encode(img: &RgbaImage, format: OutputFormat, quality: u32) -> Result<Bytes, WatermarkError> {
        if !(1..=100).contains(&quality) {
            return Err(WatermarkError::InvalidQuality(quality));
        }

        tracing::debug!(
            format = %format,
            quality = quality,
            width = img.width(),
            height = img.height(),
            "Encoding image"
        );

        match format {
            OutputFormat::Jpeg => Self::encode_jpeg(img, quality),
            OutputFormat::WebP => Self::encode_webp(img, quality),
            OutputFormat::Avif => Self::encode_avif(img, quality),
            OutputFormat::Png => Self::encode_with_image(img, ImageFormat::Png, format, false),
            OutputFormat::Gif => Self::encode_with_image(img, ImageFormat::Gif, format, false),
            OutputFormat::Tiff => Self::encode_with_image(img, ImageFormat::Tiff, format, false),
            OutputFormat::Bmp => Self::encode_with_image(img, ImageFormat::Bmp, format, true),
        }
    }

    /// Encode to JPEG using mozjpeg
    fn encode_jpeg(img: &RgbaImage, quality: u32) -> Result<Bytes, WatermarkError> {
        let name = OutputFormat::Jpeg.name();
        let rgb_img = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(|e| WatermarkError::encode(name, e))?;
        comp.write_scanlines(&rgb_img)
            .map_err(|e| WatermarkError::encode(name, e))?;
        let jpeg_data = comp.finish().map_err(|e| WatermarkError::encode(name, e))?;

        Ok(Bytes::from(jpeg_data))
    }

    /// Encode to WebP (lossy)
    fn encode_webp(img: &RgbaImage, quality: u32) -> Result<Bytes, WatermarkError> {
        let (width, height) = img.dimensions();

        let encoder = webp::Encoder::from_rgba(img.as_raw(), width, height);
        let webp_data = encoder
            .encode_simple(false, quality as f32)
            .map_err(|e| WatermarkError::encode(OutputFormat::WebP.name(), format!("{:?}", e)))?;

        Ok(Bytes::copy_from_slice(&webp_data))
    }

    /// Encode to AVIF
    fn encode_avif(img: &RgbaImage, quality: u32) -> Result<Bytes, WatermarkError> {
        let (width, height) = img.dimensions();

        let rgba_data: Vec<rgb::RGBA8> = img
            .as_raw()
            .chunks_exact(4)
            .map(|chunk| rgb::RGBA8::new(chunk[0], chunk[1], chunk[2], chunk[3]))
            .collect();

        let img_buf = ravif::Img::new(rgba_data.as_slice(), width as usize, height as usize);

        let encoder = ravif::Encoder::new()
            .with_quality(quality as f32)
            .with_speed(6);

        let avif_data = encoder
            .encode_rgba(img_buf)
            .map_err(|e| WatermarkError::encode(OutputFormat::Avif.name(), e))?;

        Ok(Bytes::from(avif_data.avif_file))
    }

    /// Lossless formats go through the `image` crate encoders
    fn encode_with_image(
        img: &RgbaImage,
        image_format: ImageFormat,
        format: OutputFormat,
        drop_alpha: bool,
    ) -> Result<Bytes, WatermarkError> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        let result = if drop_alpha {
            DynamicImage::ImageRgba8(img.clone())
                .to_rgb8()
                .write_to(&mut cursor, image_format)
        } else {
            img.write_to(&mut cursor, image_format)
        };
        result.map_err(|e| WatermarkError::encode(format.name(), e))?;

        Ok(Bytes::from(buffer))
    }
}
