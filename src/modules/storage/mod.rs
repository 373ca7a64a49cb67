//! Storage module for file management
//!
//! Provides the local filesystem client that backs image uploads
//! and retrieval.

mod local_storage;

pub use local_storage::{LocalStorage, StorageError};
