use utoipa::{Modify, OpenApi};

use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_handler::health_check,
        // Images
        images_handlers::image_handler::upload_image,
        images_handlers::image_handler::serve_image,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Health
            health_dtos::HealthStatus,
            health_dtos::UploadsDirectoryCheckDto,
            health_dtos::HealthChecksDto,
            health_dtos::HealthResponseDto,
            // Images
            images_dtos::UploadImageDto,
            images_dtos::UploadImageResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "images", description = "Image upload and retrieval"),
    ),
    info(
        title = "Imagebox API",
        version = "0.1.0",
        description = "Image upload and retrieval API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
