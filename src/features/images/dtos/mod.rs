mod image_dto;

pub use image_dto::{UploadImageDto, UploadImageResponseDto};
