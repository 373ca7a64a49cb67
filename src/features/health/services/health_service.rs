use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::features::health::dtos::{
    HealthChecksDto, HealthResponseDto, HealthStatus, UploadsDirectoryCheckDto,
};
use crate::modules::storage::{LocalStorage, StorageError};

/// Reports whether the uploads directory can accept new images
pub struct HealthService {
    storage: Arc<LocalStorage>,
    environment: String,
    started_at: Instant,
}

impl HealthService {
    pub fn new(storage: Arc<LocalStorage>, environment: String, started_at: Instant) -> Self {
        Self {
            storage,
            environment,
            started_at,
        }
    }

    async fn uploads_directory(&self) -> Result<UploadsDirectoryCheckDto, StorageError> {
        let exists = self.storage.root_exists().await?;
        let writable = exists && self.storage.is_root_writable().await;
        Ok(UploadsDirectoryCheckDto { exists, writable })
    }

    pub async fn check(&self) -> (StatusCode, HealthResponseDto) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let uploads_directory = match self.uploads_directory().await {
            Ok(check) => check,
            Err(e) => {
                warn!("Health check failed: {}", e);
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    HealthResponseDto {
                        status: HealthStatus::Unhealthy,
                        timestamp,
                        uptime: None,
                        environment: None,
                        checks: None,
                        message: None,
                        error: Some(e.to_string()),
                    },
                );
            }
        };

        let healthy = uploads_directory.exists && uploads_directory.writable;
        let report = HealthResponseDto {
            status: if healthy {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            timestamp,
            uptime: Some(self.started_at.elapsed().as_secs_f64()),
            environment: Some(self.environment.clone()),
            checks: Some(HealthChecksDto { uploads_directory }),
            message: (!healthy)
                .then(|| "Uploads directory is not accessible or writable".to_string()),
            error: None,
        };

        if healthy {
            (StatusCode::OK, report)
        } else {
            warn!(
                "Uploads directory {} unhealthy: exists={}, writable={}",
                self.storage.root().display(),
                uploads_directory.exists,
                uploads_directory.writable
            );
            (StatusCode::SERVICE_UNAVAILABLE, report)
        }
    }
}
