//! HTTP clients for driving the image endpoints from Rust

#[allow(dead_code)]
mod upload_client;

pub use upload_client::{ImageUploadClient, SelectedImage, UploadState};
