//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, plus the error and object types shared by them.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::BTreeMap;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte stream fed into a storage backend. An `Err` item aborts the
/// in-flight write.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send + 'a>>;

/// Metadata attached to an object at write time.
pub type ObjectMetadata = BTreeMap<String, String>;

/// A durably stored object. Created exactly once per successful upload and
/// immutable afterwards; the key is never reused within a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Bucket-relative path
    pub key: String,
    pub bucket: String,
    /// Publicly resolvable location
    pub url: String,
    pub content_type: String,
}

/// Storage abstraction trait
///
/// Visibility of stored objects is public-read by bucket policy; backends
/// perform no per-object ACL negotiation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream bytes to `key` without buffering the whole payload in
    /// memory. Back-pressure from the backend write must propagate to the
    /// source stream. A failure mid-stream leaves no committed object.
    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        body: ByteStream<'_>,
    ) -> StorageResult<StoredObject>;

    /// Single-shot write for payloads already in memory (transformed
    /// images).
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<StoredObject>;

    /// Publicly resolvable URL for `key`.
    fn public_url(&self, key: &str) -> String;

    /// The bucket this handle writes to.
    fn bucket(&self) -> &str;
}
