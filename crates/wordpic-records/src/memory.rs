//! In-memory record store for tests.

use crate::traits::{stamp, MeaningInput, RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wordpic_core::models::MeaningRecord;

#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    items: Arc<Mutex<Vec<(String, MeaningRecord)>>>,
    fail: Arc<AtomicBool>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of (table, record) pairs written so far.
    pub fn items(&self) -> Vec<(String, MeaningRecord)> {
        self.items.lock().expect("record lock").clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_meaning(&self, table: &str, input: MeaningInput) -> RecordResult<MeaningRecord> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RecordError::WriteFailed(
                "injected record store failure".to_string(),
            ));
        }
        let record = stamp(input);
        self.items
            .lock()
            .expect("record lock")
            .push((table.to_string(), record.clone()));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_meaning_records_table_and_item() {
        let store = InMemoryRecordStore::new();
        let record = store
            .put_meaning(
                "Word-Image",
                MeaningInput {
                    word: "gato".to_string(),
                    meaning: "cat".to_string(),
                    image_location: "https://example.test/1-cat.png".to_string(),
                },
            )
            .await
            .expect("put_meaning");
        assert!(!record.timestamp.is_empty());

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0, "Word-Image");
        assert_eq!(items[0].1, record);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryRecordStore::new();
        store.set_fail(true);
        let result = store
            .put_meaning(
                "Word-Image",
                MeaningInput {
                    word: "w".to_string(),
                    meaning: "m".to_string(),
                    image_location: "loc".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(RecordError::WriteFailed(_))));
        assert!(store.items().is_empty());
    }
}
