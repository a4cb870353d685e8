use std::sync::Arc;

use crate::persist::blob::BlobStore;
use crate::persist::error::PersistError;
use crate::shopping::{ShoppingList, ShoppingState};

/// Blob key used when none is configured.
pub const DEFAULT_KEY: &str = "shoppingLists";

/// Result of a lenient load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub lists: Vec<ShoppingList>,
    /// Set when stored data existed but could not be used.
    pub error: Option<PersistError>,
}

/// Typed load/save of the whole list collection on top of a [`BlobStore`].
#[derive(Clone)]
pub struct ListPersistence {
    blob: Arc<dyn BlobStore>,
    key: String,
}

impl ListPersistence {
    pub fn new(blob: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored collection.
    ///
    /// - Nothing stored: `Ok(vec![])`
    /// - Unparseable JSON: `PersistError::Parse`
    /// - Duplicate list ids or item ids: `PersistError::Invalid`
    pub async fn try_load(&self) -> Result<Vec<ShoppingList>, PersistError> {
        let Some(raw) = self.blob.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        let lists: Vec<ShoppingList> =
            serde_json::from_str(&raw).map_err(|e| PersistError::Parse {
                key: self.key.clone(),
                source: e,
            })?;

        ShoppingState::validate(&lists).map_err(|e| PersistError::Invalid {
            key: self.key.clone(),
            source: e,
        })?;

        Ok(lists)
    }

    /// Read the stored collection, falling back to an empty one.
    ///
    /// Never fails: any error is logged and returned alongside the empty
    /// collection so the caller can surface it.
    pub async fn load(&self) -> LoadOutcome {
        match self.try_load().await {
            Ok(lists) => {
                tracing::debug!(key = %self.key, lists = lists.len(), "Loaded shopping lists");
                LoadOutcome { lists, error: None }
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding stored shopping lists");
                LoadOutcome {
                    lists: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// Serialize the full collection and overwrite the stored value.
    pub async fn save(&self, lists: &[ShoppingList]) -> Result<(), PersistError> {
        let json = serde_json::to_string(lists).map_err(PersistError::Serialize)?;
        self.blob.set(&self.key, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryBlobStore;

    #[tokio::test]
    async fn truncated_json_is_a_parse_error() {
        let blob = Arc::new(MemoryBlobStore::with_value(DEFAULT_KEY, r#"[{"id":"1","#));
        let persistence = ListPersistence::new(blob, DEFAULT_KEY);

        assert!(matches!(
            persistence.try_load().await,
            Err(PersistError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn wrong_shape_falls_back_to_empty() {
        let blob = Arc::new(MemoryBlobStore::with_value(DEFAULT_KEY, r#"{"items":[]}"#));
        let persistence = ListPersistence::new(blob, DEFAULT_KEY);

        let outcome = persistence.load().await;
        assert!(outcome.lists.is_empty());
        assert!(matches!(outcome.error, Some(PersistError::Parse { .. })));
    }

    #[tokio::test]
    async fn duplicate_ids_are_invalid() {
        let raw = r#"[{"id":"1","name":"A","items":[]},{"id":"1","name":"B","items":[]}]"#;
        let blob = Arc::new(MemoryBlobStore::with_value(DEFAULT_KEY, raw));
        let persistence = ListPersistence::new(blob, DEFAULT_KEY);

        assert!(matches!(
            persistence.try_load().await,
            Err(PersistError::Invalid { .. })
        ));
    }
}
