//! Object storage abstraction.
//!
//! The API crate talks to storage only through the [`ObjectStorage`] trait.
//! Production uses the S3 implementation; tests use the in-memory one.

use std::time::Duration;

use async_trait::async_trait;

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};

/// Errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage upload failed: {0}")]
    Upload(String),

    #[error("storage delete failed: {0}")]
    Delete(String),

    #[error("signed URL generation failed: {0}")]
    Presign(String),
}

/// A blob store keyed by opaque string paths.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write an object. Overwrites any existing object at the same key.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// A time-limited read URL for an object.
    async fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;

    /// A stable public URL, if the backend exposes one.
    fn public_url(&self, key: &str) -> Option<String>;

    /// Remove an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
