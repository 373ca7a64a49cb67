use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, FromRequest, Multipart, Request},
    response::{IntoResponse, Response},
};

use crate::core::error::AppError;

/// Multipart extractor that reports rejections with the standard error body
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppMultipartRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(AppMultipartRejection(rejection)),
        }
    }
}

pub struct AppMultipartRejection(MultipartRejection);

impl IntoResponse for AppMultipartRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            MultipartRejection::InvalidBoundary(err) => {
                format!("Invalid multipart form data: {}", err.body_text())
            }
            _ => "Failed to parse multipart form data".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}
