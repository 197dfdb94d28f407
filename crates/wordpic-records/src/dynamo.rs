use crate::traits::{stamp, MeaningInput, RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::time::Instant;
use wordpic_core::models::MeaningRecord;

/// DynamoDB record store
#[derive(Clone)]
pub struct DynamoRecordStore {
    client: Client,
}

impl DynamoRecordStore {
    /// Create a new DynamoDB record store
    ///
    /// The client is built once at startup and shared across requests.
    /// `endpoint_url` points the client at a local DynamoDB instance.
    pub async fn new(region: String, endpoint_url: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()));

        if let Some(endpoint) = endpoint_url.clone() {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let client = Client::new(&config);

        tracing::info!(
            region = %region,
            endpoint_url = ?endpoint_url,
            "DynamoDB record store initialized"
        );

        Self { client }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_meaning(&self, table: &str, input: MeaningInput) -> RecordResult<MeaningRecord> {
        let record = stamp(input);
        let start = Instant::now();

        self.client
            .put_item()
            .table_name(table)
            .item("word", AttributeValue::S(record.word.clone()))
            .item("timestamp", AttributeValue::S(record.timestamp.clone()))
            .item("meaning", AttributeValue::S(record.meaning.clone()))
            .item("imgloc", AttributeValue::S(record.image_location.clone()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    table = %table,
                    word = %record.word,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Record write failed"
                );
                RecordError::WriteFailed(e.to_string())
            })?;

        tracing::info!(
            table = %table,
            word = %record.word,
            timestamp = %record.timestamp,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Record write successful"
        );

        Ok(record)
    }
}
