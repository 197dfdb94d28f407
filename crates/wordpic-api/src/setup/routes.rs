//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use wordpic_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/", get(handlers::health::liveness))
        .route(
            "/uploadOriginalImage",
            post(handlers::upload::upload_original_image),
        )
        .route(
            "/uploadCompressedImage/{ref_type}/{ref_id}",
            post(handlers::upload::upload_compressed_image),
        )
        .route("/image-meaning", post(handlers::meaning::image_meaning))
        .route(
            "/compressed-image-meaning",
            post(handlers::meaning::compressed_image_meaning),
        )
        // Multipart reads go through the default body limit; keep it and
        // the request-body layer in line with the configured maximum.
        .layer(DefaultBodyLimit::max(config.max_file_size_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_file_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
