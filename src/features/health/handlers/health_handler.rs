use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::features::health::dtos::HealthResponseDto;
use crate::features::health::services::HealthService;

/// Health check
///
/// Healthy only when the uploads directory exists and is writable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponseDto),
        (status = 503, description = "Uploads directory missing or not writable", body = HealthResponseDto)
    )
)]
pub async fn health_check(
    State(service): State<Arc<HealthService>>,
) -> (StatusCode, Json<HealthResponseDto>) {
    let (status, report) = service.check().await;
    (status, Json(report))
}
