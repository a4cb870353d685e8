use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::persist::blob::BlobStore;
use crate::persist::error::BlobError;

/// In-process blob store.
///
/// Counts successful writes and can be told to fail them, which makes it
/// the store of choice for exercising the writer.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the write counter.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.lock().insert(key.to_string(), value.into());
        store
    }

    /// Current raw value under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::io(
                PathBuf::from(format!("memory://{key}")),
                std::io::Error::other("store unavailable"),
            ));
        }
        self.values.lock().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
