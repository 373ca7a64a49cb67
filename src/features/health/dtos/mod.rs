mod health_dto;

pub use health_dto::{HealthChecksDto, HealthResponseDto, HealthStatus, UploadsDirectoryCheckDto};
