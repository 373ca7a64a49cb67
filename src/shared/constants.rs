/// Maximum accepted image size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Extra body allowance on the upload route for multipart framing
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// MIME types accepted by the upload endpoint
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Public path prefix under which stored images are served
pub const UPLOADS_ROUTE_PREFIX: &str = "/api/uploads";

/// Prefix of every generated file name
pub const GENERATED_NAME_PREFIX: &str = "image";

/// Extension used when the uploaded file name has none
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Stored images never change once written
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Get content type from a stored file's extension
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
