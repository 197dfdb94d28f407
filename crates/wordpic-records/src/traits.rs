//! Record store abstraction trait

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use wordpic_core::models::MeaningRecord;

/// Record store operation errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record write failed: {0}")]
    WriteFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Input fields for a meaning record; the store stamps the timestamp.
#[derive(Debug, Clone)]
pub struct MeaningInput {
    pub word: String,
    pub meaning: String,
    pub image_location: String,
}

/// Record store abstraction trait
///
/// The store is an externally-synchronized service: no client-side locking,
/// no transactions, and no coupling to the object-store write that precedes
/// a record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write one meaning record to `table`, stamping it with an
    /// epoch-millis timestamp generated at call time. Never retried; a
    /// failure surfaces to the caller.
    async fn put_meaning(&self, table: &str, input: MeaningInput) -> RecordResult<MeaningRecord>;
}

/// Stamp an input with the write-time timestamp. Millisecond resolution is
/// collision-tolerant by contract: records are keyed on (word, timestamp)
/// with no uniqueness constraint beyond that.
pub(crate) fn stamp(input: MeaningInput) -> MeaningRecord {
    MeaningRecord {
        word: input.word,
        timestamp: Utc::now().timestamp_millis().to_string(),
        meaning: input.meaning,
        image_location: input.image_location,
    }
}
