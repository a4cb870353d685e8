use async_trait::async_trait;

use crate::persist::error::BlobError;

/// Opaque asynchronous key-value store holding string blobs.
///
/// `set` fully replaces any previous value under the key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError>;

    async fn set(&self, key: &str, value: String) -> Result<(), BlobError>;
}
