//! Application state.
//!
//! Store clients are constructed once at process start and injected here as
//! long-lived, thread-safe handles; nothing reaches for ambient globals.

use std::sync::Arc;
use wordpic_core::Config;
use wordpic_processing::ResizeDimensions;
use wordpic_records::RecordStore;
use wordpic_storage::Storage;

/// Shared service handles and per-variant configuration for one process.
#[derive(Clone)]
pub struct AppState {
    /// Bucket handle for untransformed uploads.
    pub original_storage: Arc<dyn Storage>,
    /// Bucket handle for transformed uploads.
    pub compressed_storage: Arc<dyn Storage>,
    pub records: Arc<dyn RecordStore>,
    pub word_table: String,
    pub compressed_word_table: String,
    /// Transform-stage dimensions; both axes unset is a legal no-op resize.
    pub resize: ResizeDimensions,
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(
        config: &Config,
        original_storage: Arc<dyn Storage>,
        compressed_storage: Arc<dyn Storage>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            original_storage,
            compressed_storage,
            records,
            word_table: config.word_table.clone(),
            compressed_word_table: config.compressed_word_table.clone(),
            resize: ResizeDimensions::new(config.resize_width, config.resize_height),
            max_file_size: config.max_file_size_bytes,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
