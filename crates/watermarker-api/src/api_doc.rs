//! OpenAPI documentation.
//! Served at `crate::constants::OPENAPI_PATH` and rendered by RapiDoc at `DOCS_PATH`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Watermarker API",
        version = "0.1.0",
        description = "Composites a watermark image onto an uploaded image at a chosen size, anchor, padding and opacity, optionally blurring the base first, and returns the encoded result."
    ),
    paths(
        handlers::apply::apply_watermark,
        handlers::health::liveness_check,
    ),
    components(schemas(error::ErrorResponse, handlers::health::HealthResponse)),
    tags(
        (name = "watermark", description = "Watermark compositing"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;
