use axum::{
    body::Body,
    extract::{multipart::MultipartError, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::AppMultipart;
use crate::features::images::dtos::{UploadImageDto, UploadImageResponseDto};
use crate::features::images::services::ImageService;
use crate::shared::constants::{
    is_mime_type_allowed, IMAGE_FIELD, IMMUTABLE_CACHE_CONTROL, MAX_FILE_SIZE,
};
use crate::shared::types::ErrorResponse;

fn too_large() -> AppError {
    AppError::BadRequest(format!(
        "File too large. Maximum size is {}MB",
        MAX_FILE_SIZE / 1024 / 1024
    ))
}

/// Bodies cut off by the route's body limit count as oversized images
fn multipart_read_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large();
    }
    debug!("{}: {}", context, e);
    AppError::BadRequest(format!("{}: {}", context, e.body_text()))
}

/// Upload an image
///
/// Accepts multipart/form-data with an `image` field. The image is stored
/// under a generated name and can be fetched back from `imagePath`.
#[utoipa::path(
    post,
    path = "/api/upload-image",
    tag = "images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Form with a single `image` file field",
    ),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponseDto),
        (status = 400, description = "Missing image, disallowed type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(service): State<Arc<ImageService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<UploadImageResponseDto>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_read_error(e, "Failed to read multipart data"))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        if !is_mime_type_allowed(&content_type) {
            debug!("Rejected image with type {:?}", content_type);
            return Err(AppError::BadRequest(
                "Invalid file type. Allowed types: JPEG, PNG, GIF, WebP".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_read_error(e, "Failed to read image data"))?;

        if data.len() > MAX_FILE_SIZE {
            return Err(too_large());
        }

        let response = service
            .store_image(&data, &file_name, &content_type)
            .await?;

        return Ok(Json(response));
    }

    Err(AppError::BadRequest("No image uploaded".to_string()))
}

/// Serve a stored image
#[utoipa::path(
    get,
    path = "/api/uploads/{filename}",
    tag = "images",
    params(
        ("filename" = String, Path, description = "Generated file name returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "Image bytes, Content-Type derived from the file extension"),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Failed to serve image", body = ErrorResponse)
    )
)]
pub async fn serve_image(
    State(service): State<Arc<ImageService>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let image = service.load_image(&filename).await?;
    let content_length = image.bytes.len().to_string();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, image.content_type.to_string()),
            (header::CONTENT_LENGTH, content_length),
            (header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL.to_string()),
        ],
        Body::from(image.bytes),
    )
        .into_response())
}
