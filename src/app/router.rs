use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};

use crate::{app, media, AppState};

use super::errors::DefaultApiError;

/// Above the 10MB image cap so oversized images reach upload validation.
pub const MAX_REQUEST_BODY_SIZE: usize = 32 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);

    Router::new()
        .route("/", get(app::controller::get_root))
        .route("/upload", post(media::controller::upload_image))
        .route("/submit", post(media::controller::submit_task))
        .route("/status/:task_id", get(media::controller::get_task_status))
        .route("/process", post(media::controller::process_image))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|e: BoxError| async move {
                    tracing::warn!(%e, "request rejected by service layers");
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(20, Duration::from_secs(1))),
        )
}
