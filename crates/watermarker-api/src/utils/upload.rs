//! Multipart intake for the watermark endpoint
//!
//! File parts are streamed to a per-request scratch directory. The directory
//! is a [`TempDir`], so it is removed whenever the owning value is dropped.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use watermarker_core::AppError;
use watermarker_processing::WatermarkParams;

use crate::constants::{IMAGE_FIELD, WATERMARK_FIELD};
use crate::error::HttpAppError;

/// An uploaded file part written to the scratch directory
#[derive(Debug)]
pub struct SpooledFile {
    pub path: PathBuf,
    pub size: usize,
    /// Client-supplied name, for logging only
    pub file_name: Option<String>,
}

/// Everything parsed from one `/apply` request
#[derive(Debug)]
pub struct ApplyUpload {
    /// Owns the spooled files; dropping it deletes them
    pub scratch: TempDir,
    pub image: SpooledFile,
    pub watermark: SpooledFile,
    pub params: WatermarkParams,
}

/// Read the multipart body: exactly one `image` and one `watermark` part,
/// optional text fields, anything else ignored.
pub async fn read_apply_form(
    mut multipart: Multipart,
    temp_root: &Path,
    max_file_size: usize,
) -> Result<ApplyUpload, HttpAppError> {
    let scratch = tempfile::Builder::new()
        .prefix("watermarker-")
        .tempdir_in(temp_root)
        .map_err(AppError::from)?;

    let mut image: Option<SpooledFile> = None;
    let mut watermark: Option<SpooledFile> = None;
    let mut params = WatermarkParams::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            IMAGE_FIELD | WATERMARK_FIELD => {
                let slot = if field_name == IMAGE_FIELD {
                    &mut image
                } else {
                    &mut watermark
                };
                if slot.is_some() {
                    return Err(AppError::InvalidInput(format!(
                        "Multiple '{}' parts are not allowed; send exactly one",
                        field_name
                    ))
                    .into());
                }
                let target = scratch.path().join(&field_name);
                *slot = Some(spool_field(field, &field_name, &target, max_file_size).await?);
            }
            _ => {
                let value = field.text().await?;
                if !params.set(&field_name, value) {
                    tracing::debug!(field = %field_name, "Ignoring unknown form field");
                }
            }
        }
    }

    let image = image.ok_or_else(|| missing_part(IMAGE_FIELD))?;
    let watermark = watermark.ok_or_else(|| missing_part(WATERMARK_FIELD))?;

    Ok(ApplyUpload {
        scratch,
        image,
        watermark,
        params,
    })
}

async fn spool_field(
    mut field: Field<'_>,
    field_name: &str,
    target: &Path,
    max_file_size: usize,
) -> Result<SpooledFile, HttpAppError> {
    let file_name = field.file_name().map(|s| s.to_string());
    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(AppError::from)?;
    let mut size = 0usize;

    while let Some(chunk) = field.chunk().await? {
        size += chunk.len();
        validate_file_size(field_name, size, max_file_size)?;
        file.write_all(&chunk).await.map_err(AppError::from)?;
    }
    file.flush().await.map_err(AppError::from)?;

    tracing::debug!(
        field = field_name,
        file_name = ?file_name,
        size = size,
        "Spooled upload part"
    );

    Ok(SpooledFile {
        path: target.to_path_buf(),
        size,
        file_name,
    })
}

fn missing_part(name: &str) -> HttpAppError {
    AppError::InvalidInput(format!("No file uploaded: missing '{}' part", name)).into()
}

/// Validate file size
pub fn validate_file_size(field_name: &str, file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "'{}' exceeds maximum allowed size of {} MB",
            field_name,
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}
