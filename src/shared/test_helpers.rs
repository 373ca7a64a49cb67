use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;

use crate::features::images::{self, ImageService};
use crate::modules::storage::LocalStorage;

/// Storage rooted in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn temp_storage() -> (TempDir, Arc<LocalStorage>) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let storage = Arc::new(LocalStorage::new(dir.path()));
    (dir, storage)
}

pub fn image_router(storage: Arc<LocalStorage>) -> Router {
    images::routes(Arc::new(ImageService::new(storage)))
}

pub fn image_server(storage: Arc<LocalStorage>) -> TestServer {
    TestServer::new(image_router(storage)).expect("failed to start test server")
}

/// A 1x1 transparent PNG
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}
