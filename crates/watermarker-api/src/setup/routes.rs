//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::{APPLY_PATH, DOCS_PATH, HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, OPENAPI_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use watermarker_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Two file parts plus form fields
    let body_limit = config
        .max_file_size_bytes()
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        body_limit = body_limit,
        "HTTP limits configured"
    );

    let api_routes = Router::new()
        .route(APPLY_PATH, post(handlers::apply::apply_watermark))
        .route(HEALTH_PATH, get(handlers::health::liveness_check))
        .with_state(state);

    let app = api_routes
        .merge(RapiDoc::with_openapi(OPENAPI_PATH, ApiDoc::openapi()).path(DOCS_PATH))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = config.cors_origins();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(origins))
}
