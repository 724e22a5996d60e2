//! Object-storage integration.
//!
//! The gateway depends on a single collaborator operation: put one object
//! into a named bucket. [`ObjectStore`] captures that seam so handlers can
//! run against the real S3-backed client in production and a recording fake
//! in tests.

pub mod mock;
pub mod s3;

pub use mock::MockObjectStore;
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised by a storage backend.
///
/// All backend failures are treated uniformly by the gateway: the request
/// ends with a 500 carrying the backend's message. There is no retry and no
/// finer classification.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{message}")]
    Put { message: String },
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write one object. The call is atomic from the gateway's perspective:
    /// either the provider stores the whole body under `key` or it returns
    /// an error and nothing is written.
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;
}
