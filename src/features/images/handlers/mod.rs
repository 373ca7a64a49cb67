pub mod image_handler;

pub use image_handler::{serve_image, upload_image};
