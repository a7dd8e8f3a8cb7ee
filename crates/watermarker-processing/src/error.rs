//! Watermark processing errors.
//!
//! Every failure of the placement/compositing pipeline is one of these kinds.
//! None of them is retryable; the HTTP layer maps all of them to a 400.

use watermarker_core::AppError;

/// Errors that can occur while applying a watermark.
#[derive(Debug, thiserror::Error)]
pub enum WatermarkError {
    /// Zero-sized or malformed image, or a size ratio outside (0, 1]
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A request parameter is out of range or not a number
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid quality {0}: must be between 1 and 100")]
    InvalidQuality(u32),

    /// Input is not a decodable raster
    #[error("Failed to decode {subject}: {reason}")]
    DecodeError { subject: String, reason: String },

    /// Geometry produced a target the compositor cannot draw
    #[error("Failed to composite watermark: {0}")]
    CompositeError(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode {format}: {reason}")]
    EncodeError { format: &'static str, reason: String },
}

impl WatermarkError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDimensions(_) => "INVALID_DIMENSIONS",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidQuality(_) => "INVALID_QUALITY",
            Self::DecodeError { .. } => "DECODE_ERROR",
            Self::CompositeError(_) => "COMPOSITE_ERROR",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::EncodeError { .. } => "ENCODE_ERROR",
        }
    }

    pub(crate) fn decode(subject: &str, reason: impl ToString) -> Self {
        Self::DecodeError {
            subject: subject.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(format: &'static str, reason: impl ToString) -> Self {
        Self::EncodeError {
            format,
            reason: reason.to_string(),
        }
    }
}

impl From<WatermarkError> for AppError {
    fn from(err: WatermarkError) -> Self {
        AppError::Watermark {
            code: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watermarker_core::ErrorMetadata;

    #[test]
    fn test_error_display() {
        let err = WatermarkError::UnsupportedFormat("bmp2000".to_string());
        assert_eq!(err.to_string(), "Unsupported output format: bmp2000");

        let err = WatermarkError::InvalidQuality(0);
        assert_eq!(
            err.to_string(),
            "Invalid quality 0: must be between 1 and 100"
        );

        let err = WatermarkError::decode("watermark", "unsupported image format");
        assert_eq!(
            err.to_string(),
            "Failed to decode watermark: unsupported image format"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            WatermarkError::InvalidDimensions("x".into()).kind(),
            "INVALID_DIMENSIONS"
        );
        assert_eq!(WatermarkError::InvalidConfig("x".into()).kind(), "INVALID_CONFIG");
        assert_eq!(WatermarkError::CompositeError("x".into()).kind(), "COMPOSITE_ERROR");
        assert_eq!(WatermarkError::encode("jpeg", "boom").kind(), "ENCODE_ERROR");
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = WatermarkError::UnsupportedFormat("bmp2000".to_string()).into();
        assert_eq!(app.http_status_code(), 400);
        assert_eq!(app.error_code(), "UNSUPPORTED_FORMAT");
        assert_eq!(app.client_message(), "Unsupported output format: bmp2000");
    }
}
