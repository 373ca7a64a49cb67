pub mod health;
pub mod images;
