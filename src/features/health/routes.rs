use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::health::handlers::health_check;
use crate::features::health::services::HealthService;

/// Create routes for the health feature
pub fn routes(health_service: Arc<HealthService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .with_state(health_service)
}
