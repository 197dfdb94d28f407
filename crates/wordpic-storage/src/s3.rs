use crate::traits::{
    ByteStream, ObjectMetadata, Storage, StorageError, StorageResult, StoredObject,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ObjectStore, PutMultipartOptions, PutOptions, PutPayload,
    Result as ObjectResult, WriteMultipart,
};
use std::borrow::Cow;
use std::time::Instant;

/// Maximum multipart parts in flight per upload. Waiting on this bound is
/// what propagates store back-pressure to the inbound read.
const MAX_CONCURRENT_PARTS: usize = 8;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style URLs from the endpoint.
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    /// Content type plus caller/derived metadata, attached at write time.
    fn build_attributes(content_type: &str, metadata: &ObjectMetadata) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        for (name, value) in metadata {
            attributes.insert(
                Attribute::Metadata(Cow::Owned(name.clone())),
                value.clone().into(),
            );
        }
        attributes
    }

    fn stored(&self, key: &str, content_type: &str) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            bucket: self.bucket.clone(),
            url: self.generate_url(key),
            content_type: content_type.to_string(),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        mut body: ByteStream<'_>,
    ) -> StorageResult<StoredObject> {
        let location = Path::from(key.to_string());
        let start = Instant::now();

        let opts = PutMultipartOptions {
            attributes: Self::build_attributes(content_type, metadata),
            ..Default::default()
        };
        let upload = self
            .store
            .put_multipart_opts(&location, opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 multipart upload could not be started"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let mut writer = WriteMultipart::new(upload);
        let mut size: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    // Source stream failed mid-upload. Abort so no object
                    // is committed.
                    writer.abort().await.ok();
                    tracing::error!(
                        error = %e,
                        bucket = %self.bucket,
                        key = %key,
                        size_bytes = size,
                        "S3 stream upload aborted: source stream error"
                    );
                    return Err(e);
                }
            };
            size += chunk.len() as u64;

            if let Err(e) = writer.wait_for_capacity(MAX_CONCURRENT_PARTS).await {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    "S3 stream upload failed while writing part"
                );
                writer.abort().await.ok();
                return Err(StorageError::UploadFailed(e.to_string()));
            }
            writer.write(&chunk);
        }

        if let Err(e) = writer.finish().await {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 stream upload failed"
            );
            return Err(StorageError::UploadFailed(e.to_string()));
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 stream upload successful"
        );

        Ok(self.stored(key, content_type))
    }

    async fn put(
        &self,
        key: &str,
        content_type: &str,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<StoredObject> {
        let location = Path::from(key.to_string());
        let size = data.len() as u64;
        let start = Instant::now();

        let opts = PutOptions {
            attributes: Self::build_attributes(content_type, metadata),
            ..Default::default()
        };
        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.stored(key, content_type))
    }

    fn public_url(&self, key: &str) -> String {
        self.generate_url(key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_storage(endpoint: Option<&str>) -> S3Storage {
        S3Storage::new(
            "test-bucket".to_string(),
            "us-east-2".to_string(),
            endpoint.map(String::from),
        )
        .await
        .expect("build storage")
    }

    #[tokio::test]
    async fn test_generate_url_aws() {
        let storage = test_storage(None).await;
        assert_eq!(
            storage.public_url("1700000000000-cat.png"),
            "https://test-bucket.s3.us-east-2.amazonaws.com/1700000000000-cat.png"
        );
    }

    #[tokio::test]
    async fn test_generate_url_custom_endpoint() {
        let storage = test_storage(Some("http://localhost:9000/")).await;
        assert_eq!(
            storage.public_url("uploads/animal/42/1-dog.jpg"),
            "http://localhost:9000/test-bucket/uploads/animal/42/1-dog.jpg"
        );
    }

    #[test]
    fn test_build_attributes_includes_metadata() {
        let mut metadata = ObjectMetadata::new();
        metadata.insert("filename".to_string(), "cat.png".to_string());
        let attributes = S3Storage::build_attributes("image/png", &metadata);
        assert_eq!(attributes.len(), 2);
    }
}
