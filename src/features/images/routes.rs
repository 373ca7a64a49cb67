use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::images::handlers::{serve_image, upload_image};
use crate::features::images::services::ImageService;
use crate::shared::constants::{MAX_FILE_SIZE, MULTIPART_OVERHEAD};

/// Create routes for the images feature
pub fn routes(image_service: Arc<ImageService>) -> Router {
    Router::new()
        .route(
            "/api/upload-image",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(upload_image).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/api/uploads/{filename}", get(serve_image))
        .with_state(image_service)
}
