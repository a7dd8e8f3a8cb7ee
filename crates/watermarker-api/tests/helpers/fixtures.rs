//! Test fixtures: images generated in memory.

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const BASE_COLOR: Rgba<u8> = Rgba([30, 60, 90, 255]);
pub const MARK_COLOR: Rgba<u8> = Rgba([240, 240, 20, 255]);

/// Solid-color PNG of the given size.
pub fn create_test_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, color);
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    buffer
}

pub fn png_part(data: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(Bytes::from(data))
        .file_name(file_name)
        .mime_type("image/png")
}

/// Form with an 800x600 base and a 400x100 watermark.
pub fn base_form() -> MultipartForm {
    MultipartForm::new()
        .add_part("image", png_part(create_test_png(800, 600, BASE_COLOR), "photo.png"))
        .add_part(
            "watermark",
            png_part(create_test_png(400, 100, MARK_COLOR), "logo.png"),
        )
}

/// PNG of alternating black and white columns; blurring pulls it toward grey.
pub fn create_striped_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    buffer
}
