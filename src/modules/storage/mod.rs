//! Storage module for report evidence
//!
//! Provides the object-store capability and its MinIO/S3-compatible
//! implementation.

mod minio_client;
mod object_store;

pub use minio_client::MinIOClient;
pub use object_store::ObjectStore;
