use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use futures::stream;
use wordpic_core::models::UploadResponse;
use wordpic_core::AppError;
use wordpic_storage::{ByteStream, ObjectMetadata, StorageError, StoredObject};

use crate::error::HttpAppError;
use crate::services::upload::{KeyScope, ReceivedFile, UploadPipeline};
use crate::state::AppState;

/// Upload an image without transformation.
///
/// The file streams straight through validation into the originals bucket
/// under a flat timestamp-prefixed key.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_original"))]
pub async fn upload_original_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let pipeline = UploadPipeline::passthrough(state.original_storage.clone(), state.max_file_size);
    let stored = run_upload(&pipeline, KeyScope::Flat, multipart).await?;
    Ok(Json(UploadResponse {
        image_url: stored.url,
    }))
}

/// Upload an image through the transform stage, scoped to a reference.
///
/// The key is namespaced by the `{ref_type}/{ref_id}` path parameters and
/// the payload is re-encoded (and resized when dimensions are configured)
/// before it reaches the compressed bucket.
#[tracing::instrument(
    skip(state, multipart),
    fields(operation = "upload_compressed", ref_type = %ref_type, ref_id = %ref_id)
)]
pub async fn upload_compressed_image(
    State(state): State<Arc<AppState>>,
    Path((ref_type, ref_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let pipeline = UploadPipeline::transforming(
        state.compressed_storage.clone(),
        state.resize,
        state.max_file_size,
    );
    let scope = KeyScope::Reference { ref_type, ref_id };
    let stored = run_upload(&pipeline, scope, multipart).await?;
    Ok(Json(UploadResponse {
        image_url: stored.url,
    }))
}

/// Walk the multipart request and feed the `image` part to the pipeline.
///
/// Text fields seen before the file part become caller metadata on the
/// stored object; the file part itself is forwarded as a stream without
/// buffering. Fields after the file are not part of the metadata contract.
async fn run_upload(
    pipeline: &UploadPipeline,
    scope: KeyScope,
    mut multipart: Multipart,
) -> Result<StoredObject, HttpAppError> {
    let mut caller_fields = ObjectMetadata::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Malformed multipart request: {}",
            e
        )))
    })? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            let body: ByteStream<'_> = Box::pin(stream::try_unfold(field, |mut field| async move {
                match field.chunk().await {
                    Ok(Some(chunk)) => Ok(Some((chunk, field))),
                    Ok(None) => Ok(None),
                    Err(e) => Err(StorageError::IoError(std::io::Error::other(e))),
                }
            }));

            let file = ReceivedFile {
                filename,
                content_type,
                caller_fields,
                body,
            };
            return pipeline.run(scope, file).await.map_err(HttpAppError::from);
        }

        let value = field.text().await.map_err(|e| {
            HttpAppError(AppError::InvalidInput(format!(
                "Malformed multipart field '{}': {}",
                name, e
            )))
        })?;
        caller_fields.insert(name, value);
    }

    Err(HttpAppError(AppError::InvalidInput(
        "Missing multipart field 'image'".to_string(),
    )))
}
