//! API constants
//!
//! Route paths and fixed limits used by the router, handlers and OpenAPI document.

/// Watermark endpoint
pub const APPLY_PATH: &str = "/apply";

/// Liveness probe
pub const HEALTH_PATH: &str = "/health";

/// Served OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// RapiDoc viewer
pub const DOCS_PATH: &str = "/docs";

/// Multipart part carrying the base image
pub const IMAGE_FIELD: &str = "image";

/// Multipart part carrying the watermark image
pub const WATERMARK_FIELD: &str = "watermark";

/// Allowance on top of the two file parts for text fields and multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// File name stem used in `Content-Disposition`
pub const OUTPUT_FILE_STEM: &str = "watermarked";
