//! In-memory storage backend.
//!
//! Backs the API integration tests: stores objects in a `Vec` behind a
//! mutex, exposes what was written for assertions, and can be switched
//! into a failing mode to exercise storage error paths.

use crate::traits::{
    ByteStream, ObjectMetadata, Storage, StorageError, StorageResult, StoredObject,
};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One object captured by the in-memory backend.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub key: String,
    pub content_type: String,
    pub metadata: ObjectMetadata,
    pub data: Bytes,
    /// True when the write came through the streaming path.
    pub streamed: bool,
}

#[derive(Clone)]
pub struct InMemoryStorage {
    bucket: String,
    objects: Arc<Mutex<Vec<StoredEntry>>>,
    fail: Arc<AtomicBool>,
}

impl InMemoryStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent write fail with a backend error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything written so far.
    pub fn entries(&self) -> Vec<StoredEntry> {
        self.objects.lock().expect("storage lock").clone()
    }

    fn record(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        data: Bytes,
        streamed: bool,
    ) -> StorageResult<StoredObject> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "injected storage failure".to_string(),
            ));
        }
        self.objects.lock().expect("storage lock").push(StoredEntry {
            key: key.to_string(),
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
            data,
            streamed,
        });
        Ok(StoredObject {
            key: key.to_string(),
            bucket: self.bucket.clone(),
            url: self.public_url(key),
            content_type: content_type.to_string(),
        })
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        mut body: ByteStream<'_>,
    ) -> StorageResult<StoredObject> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        self.record(key, content_type, metadata, buffer.freeze(), true)
    }

    async fn put(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<StoredObject> {
        self.record(key, content_type, metadata, data, false)
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}.storage.test/{}", self.bucket, key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
