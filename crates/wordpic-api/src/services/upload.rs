//! Upload pipeline orchestration.
//!
//! One request flows through explicit, strictly sequential stages:
//! receive → validate → (transform) → store. The stages are composed here
//! by the orchestrator; nothing is retried, and a failure at any stage
//! terminates the upload with no committed object.
//!
//! Two endpoint variants share this logic and differ only in
//! parameterization: a passthrough variant (no transform, flat key
//! namespace) and a transforming variant (resize/re-encode, reference-
//! scoped key namespace).

use crate::error::validation_to_app;
use std::sync::Arc;
use wordpic_core::AppError;
use wordpic_processing::{ImageFileValidator, ImageTransformer, ResizeDimensions};
use wordpic_storage::{keys, merge_object_metadata, ByteStream, ObjectMetadata, Storage, StoredObject};

/// Key namespace selected by the endpoint variant.
#[derive(Debug, Clone)]
pub enum KeyScope {
    /// `{epoch_millis}-{filename}`
    Flat,
    /// `uploads/{ref_type}/{ref_id}/{epoch_millis}-{filename}`
    Reference { ref_type: String, ref_id: String },
}

/// One upload drawn from the multipart request. Exists only for the
/// lifetime of that request; the body is consumed by the pipeline.
pub struct ReceivedFile<'a> {
    pub filename: String,
    pub content_type: String,
    /// Request text fields seen before the file part; stored verbatim as
    /// object metadata (derived fields still win collisions).
    pub caller_fields: ObjectMetadata,
    pub body: ByteStream<'a>,
}

/// Request-scoped upload pipeline, parameterized per endpoint variant.
pub struct UploadPipeline {
    validator: ImageFileValidator,
    storage: Arc<dyn Storage>,
    transform: Option<ResizeDimensions>,
}

impl UploadPipeline {
    /// Variant without a transform stage: bytes stream straight through to
    /// the store.
    pub fn passthrough(storage: Arc<dyn Storage>, max_file_size: usize) -> Self {
        Self {
            validator: ImageFileValidator::new(max_file_size),
            storage,
            transform: None,
        }
    }

    /// Variant with the transform stage enabled.
    pub fn transforming(
        storage: Arc<dyn Storage>,
        resize: ResizeDimensions,
        max_file_size: usize,
    ) -> Self {
        Self {
            validator: ImageFileValidator::new(max_file_size),
            storage,
            transform: Some(resize),
        }
    }

    /// Run the pipeline for one received file.
    pub async fn run(
        &self,
        scope: KeyScope,
        file: ReceivedFile<'_>,
    ) -> Result<StoredObject, AppError> {
        // Validate: reject before any byte reaches the store.
        self.validator
            .validate(&file.filename, &file.content_type)
            .map_err(validation_to_app)?;

        let key = match &scope {
            KeyScope::Flat => keys::flat_key(&file.filename),
            KeyScope::Reference { ref_type, ref_id } => {
                keys::reference_key(ref_type, ref_id, &file.filename)
            }
        };

        match self.transform {
            Some(dims) if ImageTransformer::should_transform(&file.content_type) => {
                // Transform: the decode needs the whole payload, so this
                // path buffers; the store never sees pre-transform bytes.
                let data = collect_body(file.body).await?;
                self.validator
                    .validate_size(data.len())
                    .map_err(validation_to_app)?;

                let (transformed, output_content_type) =
                    ImageTransformer::transform(&data, dims, &file.content_type)
                        .map_err(|e| AppError::Transform(e.to_string()))?;

                let metadata = merge_object_metadata(
                    &file.caller_fields,
                    &output_content_type,
                    &file.filename,
                );
                self.storage
                    .put(&key, &output_content_type, &metadata, transformed)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))
            }
            _ => {
                // Store: stream the inbound body directly; back-pressure
                // from the store write propagates to the read.
                let metadata = merge_object_metadata(
                    &file.caller_fields,
                    &file.content_type,
                    &file.filename,
                );
                self.storage
                    .put_stream(&key, &file.content_type, &metadata, file.body)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))
            }
        }
    }
}

/// Drain the inbound stream into memory for the transform stage.
async fn collect_body(mut body: ByteStream<'_>) -> Result<Vec<u8>, AppError> {
    use futures::StreamExt;

    let mut data = Vec::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| AppError::Internal(format!("Failed to read upload: {}", e)))?;
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
