//! Client-side upload state for the image form.
//!
//! Mirrors what the browser form tracks: the selected image and its preview,
//! the path of the last successful upload, whether a request is in flight,
//! and the message to show when something went wrong.

use base64::prelude::*;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::shared::constants::IMAGE_FIELD;
use crate::shared::i18n::{t, Locale};

/// An image picked by the user, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub image: Option<SelectedImage>,
    /// `data:` URL of the selected image
    pub preview: Option<String>,
    /// Retrieval path returned by the last successful upload
    pub uploaded_image_path: Option<String>,
    pub is_uploading: bool,
    pub error_message: Option<String>,
}

/// Subset of the upload endpoint's JSON body the client reacts to
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UploadResult {
    success: bool,
    image_path: Option<String>,
    error: Option<String>,
}

pub struct ImageUploadClient {
    http: Client,
    base_url: String,
    locale: Locale,
    state: UploadState,
}

impl ImageUploadClient {
    pub fn new(base_url: impl Into<String>, locale: Locale) -> Self {
        Self::with_client(Client::new(), base_url, locale)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, locale: Locale) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale,
            state: UploadState::default(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Absolute URL of the last uploaded image
    pub fn image_url(&self) -> Option<String> {
        self.state
            .uploaded_image_path
            .as_ref()
            .map(|path| format!("{}{}", self.base_url, path))
    }

    /// Select an image and build its preview
    pub async fn select_image(&mut self, image: SelectedImage) {
        self.state.error_message = None;

        let content_type = image.content_type.clone();
        let bytes = image.bytes.clone();
        self.state.image = Some(image);

        let encoded = tokio::task::spawn_blocking(move || BASE64_STANDARD.encode(bytes)).await;
        match encoded {
            Ok(payload) => {
                self.state.preview = Some(format!("data:{};base64,{}", content_type, payload));
            }
            Err(e) => warn!("Failed to build image preview: {}", e),
        }
    }

    /// Post the selected image to the upload endpoint. No-op without a selection.
    pub async fn upload(&mut self) {
        let Some(image) = self.state.image.clone() else {
            return;
        };

        self.state.is_uploading = true;
        self.state.error_message = None;

        match self.post_image(image).await {
            Ok((true, UploadResult { success: true, image_path, .. })) => {
                self.state.uploaded_image_path = image_path;
            }
            Ok((_, result)) => {
                self.state.error_message = Some(
                    result
                        .error
                        .unwrap_or_else(|| t(self.locale, "imageUpload.error.generic")),
                );
            }
            Err(e) => {
                warn!("Upload error: {}", e);
                self.state.error_message = Some(t(self.locale, "imageUpload.error.network"));
            }
        }

        self.state.is_uploading = false;
    }

    /// Clear the selection, preview, result and error
    pub fn reset(&mut self) {
        self.state = UploadState::default();
    }

    async fn post_image(&self, image: SelectedImage) -> reqwest::Result<(bool, UploadResult)> {
        let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        let part = match part.mime_str(&image.content_type) {
            Ok(part) => part,
            Err(e) => {
                warn!("Unusable content type {:?}: {}", image.content_type, e);
                Part::bytes(image.bytes).file_name(image.file_name)
            }
        };

        let response = self
            .http
            .post(format!("{}/api/upload-image", self.base_url))
            .multipart(Form::new().part(IMAGE_FIELD, part))
            .send()
            .await?;

        let ok = response.status().is_success();
        let result = response.json::<UploadResult>().await?;
        Ok((ok, result))
    }
}
