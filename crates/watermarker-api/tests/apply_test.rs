//! Watermark API integration tests.
//!
//! Run with: `cargo test -p watermarker-api --test apply_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use helpers::fixtures::{
    base_form, create_striped_png, create_test_png, png_part, BASE_COLOR, MARK_COLOR,
};
use helpers::{setup_test_app, setup_test_app_with};
use image::{GenericImageView, Rgba};
use std::time::{Duration, Instant};

fn close_to(actual: Rgba<u8>, expected: Rgba<u8>, tolerance: u8) -> bool {
    actual
        .0
        .iter()
        .zip(expected.0.iter())
        .take(3)
        .all(|(a, e)| a.abs_diff(*e) <= tolerance)
}

#[tokio::test]
async fn test_apply_with_defaults_returns_png() {
    let app = setup_test_app();

    let response = app.client().post("/apply").multipart(base_form()).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.header("content-disposition"),
        "inline; filename=\"watermarked.png\""
    );

    let decoded = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!(decoded.dimensions(), (800, 600));
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_apply_bottom_right_jpeg() {
    let app = setup_test_app();

    let form = base_form()
        .add_text("size", "50")
        .add_text("position", "bottom-right")
        .add_text("padding", "20")
        .add_text("opacity", "100")
        .add_text("quality", "90")
        .add_text("format", "jpeg");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(
        response.header("content-disposition"),
        "inline; filename=\"watermarked.jpg\""
    );

    let decoded = image::load_from_memory(response.as_bytes())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (800, 600));

    // Watermark block spans (380, 480) to (780, 580)
    assert!(close_to(*decoded.get_pixel(580, 530), MARK_COLOR, 12));
    assert!(close_to(*decoded.get_pixel(100, 100), BASE_COLOR, 12));
    assert!(close_to(*decoded.get_pixel(790, 590), BASE_COLOR, 12));
    assert!(close_to(*decoded.get_pixel(360, 530), BASE_COLOR, 12));
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_missing_watermark_part() {
    let app = setup_test_app();

    let form = MultipartForm::new().add_part(
        "image",
        png_part(create_test_png(100, 100, BASE_COLOR), "photo.png"),
    );
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("watermark"));
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_duplicate_image_part() {
    let app = setup_test_app();

    let form = base_form().add_part(
        "image",
        png_part(create_test_png(10, 10, BASE_COLOR), "again.png"),
    );
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unsupported_format() {
    let app = setup_test_app();

    let form = base_form().add_text("format", "bmp2000");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(body["error"], "Unsupported output format: bmp2000");
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_out_of_range_size_is_rejected() {
    let app = setup_test_app();

    let form = base_form().add_text("size", "0");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_CONFIG");
}

#[tokio::test]
async fn test_undecodable_image_does_not_leak_paths() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(Bytes::from_static(b"not an image at all"))
                .file_name("photo.png")
                .mime_type("image/png"),
        )
        .add_part(
            "watermark",
            png_part(create_test_png(10, 10, MARK_COLOR), "logo.png"),
        );
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let text = response.text();
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["code"], "DECODE_ERROR");

    let temp_root = app.temp_dir.path().to_string_lossy().to_string();
    assert!(!text.contains(&temp_root));
    assert!(!text.contains("watermarker-"));
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_oversized_part_is_rejected() {
    let app = setup_test_app_with(&[("MAX_FILE_SIZE_MB", "1")]);

    let form = MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(Bytes::from(vec![0u8; 1024 * 1024 + 512 * 1024]))
                .file_name("huge.png")
                .mime_type("image/png"),
        )
        .add_part(
            "watermark",
            png_part(create_test_png(10, 10, MARK_COLOR), "logo.png"),
        );
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 413);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_unknown_fields_and_positions_are_tolerated() {
    let app = setup_test_app();

    let form = base_form()
        .add_text("colour", "red")
        .add_text("position", "somewhere-else")
        .add_text("blur", "")
        .add_text("opacity", "0");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let decoded = image::load_from_memory(response.as_bytes())
        .unwrap()
        .to_rgba8();
    // Zero opacity leaves the base untouched
    assert!(decoded.pixels().all(|px| *px == BASE_COLOR));
}

#[tokio::test]
async fn test_apply_with_blur() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_part("image", png_part(create_striped_png(100, 100), "stripes.png"))
        .add_part(
            "watermark",
            png_part(create_test_png(10, 10, MARK_COLOR), "logo.png"),
        )
        .add_text("size", "10")
        .add_text("position", "top-left")
        .add_text("padding", "0")
        .add_text("opacity", "100")
        .add_text("blur", "4");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let decoded = image::load_from_memory(response.as_bytes())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (100, 100));

    // Watermark covers (0, 0)..(10, 10); stripes elsewhere are smoothed
    assert_eq!(*decoded.get_pixel(5, 5), MARK_COLOR);
    for x in [50, 51, 80, 81] {
        let value = decoded.get_pixel(x, 80)[0];
        assert!(value > 60 && value < 195, "pixel ({}, 80) = {}", x, value);
    }
}

#[tokio::test]
async fn test_blur_above_limit_is_rejected() {
    let app = setup_test_app();

    let form = base_form().add_text("blur", "100000");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_CONFIG");
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_deadline_returns_503_and_releases_scratch() {
    let app = setup_test_app_with(&[("REQUEST_TIMEOUT_SECS", "1")]);

    // Widest accepted blur over a large base keeps the job busy past the deadline
    let form = MultipartForm::new()
        .add_part(
            "image",
            png_part(create_test_png(1400, 1400, BASE_COLOR), "large.png"),
        )
        .add_part(
            "watermark",
            png_part(create_test_png(10, 10, MARK_COLOR), "logo.png"),
        )
        .add_text("blur", "100");
    let response = app.client().post("/apply").multipart(form).await;

    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "PROCESSING_TIMEOUT");
    assert_eq!(body["recoverable"], true);

    // The abandoned job drops its scratch directory once it finishes
    let started = Instant::now();
    while app.scratch_entries() != 0 {
        assert!(
            started.elapsed() < Duration::from_secs(600),
            "scratch directory was never released"
        );
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/apply").is_some());
}
