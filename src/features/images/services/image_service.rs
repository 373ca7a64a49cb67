use chrono::Utc;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::UploadImageResponseDto;
use crate::modules::storage::{LocalStorage, StorageError};
use crate::shared::constants::{
    content_type_for_extension, GENERATED_NAME_PREFIX, UPLOADS_ROUTE_PREFIX,
};
use crate::shared::validation::{extension_from_filename, is_safe_filename};

/// How many consecutive millisecond stamps to try when a name is taken
const MAX_NAME_ATTEMPTS: i64 = 16;

/// An image read back from storage
#[derive(Debug)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Service for image storage and retrieval
pub struct ImageService {
    storage: Arc<LocalStorage>,
}

impl ImageService {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    fn upload_failed(e: impl ToString) -> AppError {
        AppError::storage("Failed to upload image", e)
    }

    fn generated_name(stamp: i64, extension: &str) -> String {
        format!("{}-{}.{}", GENERATED_NAME_PREFIX, stamp, extension)
    }

    /// Persist an already validated image under a generated name
    ///
    /// # Arguments
    /// * `data` - The image bytes
    /// * `original_filename` - File name declared by the client, used for the extension
    /// * `content_type` - MIME type declared by the client
    pub async fn store_image(
        &self,
        data: &[u8],
        original_filename: &str,
        content_type: &str,
    ) -> Result<UploadImageResponseDto> {
        let extension = extension_from_filename(original_filename);

        self.storage
            .ensure_root()
            .await
            .map_err(Self::upload_failed)?;

        // Names are image-<epochMillis>.<ext>; on a same-millisecond collision
        // move to the next free stamp instead of overwriting.
        let first_stamp = Utc::now().timestamp_millis();
        let mut file_name = None;
        for stamp in first_stamp..first_stamp + MAX_NAME_ATTEMPTS {
            let candidate = Self::generated_name(stamp, &extension);
            match self.storage.write_new(&candidate, data).await {
                Ok(_) => {
                    file_name = Some(candidate);
                    break;
                }
                Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("Name {} already taken, trying next stamp", candidate);
                }
                Err(e) => return Err(Self::upload_failed(e)),
            }
        }

        let file_name = file_name.ok_or_else(|| {
            Self::upload_failed(format!(
                "no free file name after {} attempts",
                MAX_NAME_ATTEMPTS
            ))
        })?;

        info!(
            "Image stored: name={}, type={}, size={}",
            file_name,
            content_type,
            data.len()
        );

        Ok(UploadImageResponseDto {
            success: true,
            image_path: format!("{}/{}", UPLOADS_ROUTE_PREFIX, file_name),
            file_name,
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    /// Read a stored image by its generated name
    pub async fn load_image(&self, filename: &str) -> Result<StoredImage> {
        if !is_safe_filename(filename) {
            debug!("Rejected unsafe filename: {:?}", filename);
            return Err(AppError::BadRequest("Invalid filename".to_string()));
        }

        let path = match self.storage.resolve(filename).await {
            Ok(Some(path)) => path,
            Ok(None) => return Err(AppError::NotFound("Image not found".to_string())),
            Err(StorageError::Escapes(name)) => {
                warn!("Stored name {} resolves outside the uploads directory", name);
                return Err(AppError::BadRequest("Invalid filename".to_string()));
            }
            Err(e) => {
                error!("Error resolving image {}: {}", filename, e);
                return Err(AppError::Internal("Failed to serve image".to_string()));
            }
        };

        let bytes = self.storage.read(&path).await.map_err(|e| {
            error!("Error serving image {}: {}", filename, e);
            AppError::Internal("Failed to serve image".to_string())
        })?;

        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        Ok(StoredImage {
            bytes,
            content_type: content_type_for_extension(extension),
        })
    }
}
