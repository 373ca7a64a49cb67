//! Modules layer - Infrastructure components
//!
//! Contains the storage gateway the features persist images through.

pub mod storage;
