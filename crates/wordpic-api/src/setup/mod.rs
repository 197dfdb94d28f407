//! Application wiring: state construction, routes, and server startup.

pub mod routes;
pub mod server;

use crate::state::AppState;
use std::sync::Arc;
use wordpic_core::Config;
use wordpic_records::DynamoRecordStore;
use wordpic_storage::S3Storage;

/// Construct the long-lived service handles and application state.
///
/// One S3 handle per bucket and one DynamoDB client are created here, once
/// per process, and shared by every request.
pub async fn build_state(config: &Config) -> Result<Arc<AppState>, anyhow::Error> {
    let original_storage = S3Storage::new(
        config.original_bucket.clone(),
        config.aws_region.clone(),
        config.s3_endpoint.clone(),
    )
    .await?;

    let compressed_storage = S3Storage::new(
        config.compressed_bucket.clone(),
        config.aws_region.clone(),
        config.s3_endpoint.clone(),
    )
    .await?;

    let records =
        DynamoRecordStore::new(config.aws_region.clone(), config.dynamodb_endpoint.clone()).await;

    tracing::info!(
        original_bucket = %config.original_bucket,
        compressed_bucket = %config.compressed_bucket,
        word_table = %config.word_table,
        compressed_word_table = %config.compressed_word_table,
        "Service handles initialized"
    );

    Ok(Arc::new(AppState::new(
        config,
        Arc::new(original_storage),
        Arc::new(compressed_storage),
        Arc::new(records),
    )))
}
