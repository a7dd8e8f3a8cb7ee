use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::error::WatermarkError;

/// Decode an in-memory image, sniffing its format from the content.
///
/// `subject` names the input in error messages (`"image"`, `"watermark"`).
pub fn decode_image(data: &[u8], subject: &str) -> Result<DynamicImage, WatermarkError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| WatermarkError::decode(subject, e))?;

    if reader.format().is_none() {
        return Err(WatermarkError::decode(subject, "unrecognized image format"));
    }

    let img = reader
        .decode()
        .map_err(|e| WatermarkError::decode(subject, e))?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(WatermarkError::InvalidDimensions(format!(
            "{} is {}x{}",
            subject, width, height
        )));
    }

    tracing::debug!(
        subject = subject,
        width = width,
        height = height,
        "Decoded image"
    );

    Ok(img)
}

/// Read and decode an image file. Errors never include the path.
pub fn open_image(path: &Path, subject: &str) -> Result<DynamicImage, WatermarkError> {
    let data = std::fs::read(path).map_err(|e| WatermarkError::decode(subject, e.kind()))?;
    decode_image(&data, subject)
}
