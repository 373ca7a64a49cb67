use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload (JPEG, PNG, GIF or WebP, at most 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Response DTO for a stored image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponseDto {
    /// Always true on success
    pub success: bool,
    /// Path to fetch the image from this API
    #[schema(example = "/api/uploads/image-1700000000000.png")]
    pub image_path: String,
    /// Generated file name
    #[schema(example = "image-1700000000000.png")]
    pub file_name: String,
    /// Size of the image in bytes
    pub size: u64,
    /// MIME type declared by the client
    #[serde(rename = "type")]
    #[schema(example = "image/png")]
    pub content_type: String,
}
