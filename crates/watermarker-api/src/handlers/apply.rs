use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use watermarker_core::AppError;
use watermarker_processing::{apply_watermark as composite_watermark, open_image, WatermarkOutput};

use crate::constants::OUTPUT_FILE_STEM;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{read_apply_form, ApplyUpload};

/// Apply a watermark to an uploaded image
///
/// Accepts a `multipart/form-data` body with two file parts, `image` and
/// `watermark`, and the optional text fields `size` (1-100, default 75),
/// `position` (one of nine anchors, default `center`), `padding` (pixels,
/// default 10), `opacity` (0-100, default 75), `blur` (radius 0-100, default none),
/// `quality` (1-100, default 100) and `format` (default `png`).
///
/// Decoding, compositing and encoding run on the blocking pool under the
/// configured deadline. The request's scratch directory is removed on every
/// exit path.
///
/// # Errors
/// - `AppError::InvalidInput` - Missing or duplicated parts, malformed multipart
/// - `AppError::Watermark` - Invalid parameters, undecodable input, unsupported format
/// - `AppError::PayloadTooLarge` - A part exceeds the upload limit
/// - `AppError::Timeout` - Processing exceeded the deadline
/// - `AppError::Internal` - Scratch storage or worker failure
#[utoipa::path(
    post,
    path = "/apply",
    tag = "watermark",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Watermarked image", content_type = "image/*"),
        (status = 400, description = "Invalid input or processing error", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Processing timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %uuid::Uuid::new_v4(), operation = "apply_watermark")
)]
pub async fn apply_watermark(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let config = &state.config;

    let upload = read_apply_form(multipart, &config.temp_dir(), config.max_file_size_bytes()).await?;
    let placement = upload.params.validate()?;

    let ApplyUpload {
        scratch,
        image,
        watermark,
        ..
    } = upload;

    tracing::info!(
        image = ?image.file_name,
        image_size = image.size,
        watermark = ?watermark.file_name,
        watermark_size = watermark.size,
        anchor = %placement.anchor,
        format = %placement.output_format,
        "Applying watermark"
    );

    let job = tokio::task::spawn_blocking(move || {
        // Scratch files live exactly as long as the job
        let _scratch = scratch;
        let base = open_image(&image.path, "image")?;
        let mark = open_image(&watermark.path, "watermark")?;
        composite_watermark(&base, &mark, &placement)
    });

    let timeout_secs = config.request_timeout_secs();
    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), job).await {
        Ok(joined) => joined.map_err(|e| {
            AppError::from(anyhow::Error::new(e).context("Watermark task failed to complete"))
        })??,
        Err(_) => {
            return Err(AppError::Timeout(format!(
                "Processing exceeded the {}s deadline",
                timeout_secs
            ))
            .into());
        }
    };

    build_image_response(output)
}

fn build_image_response(output: WatermarkOutput) -> Result<Response, HttpAppError> {
    let format = output.format;
    tracing::debug!(format = %format, bytes = output.bytes.len(), "Watermark applied");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.to_mime_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "inline; filename=\"{}.{}\"",
                OUTPUT_FILE_STEM,
                format.extension()
            ),
        )
        .header(header::CONTENT_LENGTH, output.bytes.len())
        .body(Body::from(output.bytes))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError(AppError::Internal(e.to_string()))
        })
}
