mod common;

use std::sync::Arc;

use shoplist::persist::{
    BlobStore, FileBlobStore, ListPersistence, MemoryBlobStore, PersistError, DEFAULT_KEY,
};
use tempfile::TempDir;

#[tokio::test]
async fn save_then_load_round_trips() {
    let blob = Arc::new(MemoryBlobStore::new());
    let persistence = ListPersistence::new(blob, DEFAULT_KEY);
    let lists = common::sample_lists();

    persistence.save(&lists).await.unwrap();
    let outcome = persistence.load().await;

    assert_eq!(outcome.lists, lists);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn file_store_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let blob = Arc::new(FileBlobStore::new(temp_dir.path()));
    let persistence = ListPersistence::new(blob, DEFAULT_KEY);
    let lists = common::sample_lists();

    persistence.save(&lists).await.unwrap();

    let reopened = ListPersistence::new(Arc::new(FileBlobStore::new(temp_dir.path())), DEFAULT_KEY);
    assert_eq!(reopened.try_load().await.unwrap(), lists);
}

#[tokio::test]
async fn absent_blob_loads_empty() {
    let persistence = ListPersistence::new(Arc::new(MemoryBlobStore::new()), DEFAULT_KEY);

    let outcome = persistence.load().await;

    assert!(outcome.lists.is_empty());
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn garbage_blob_loads_empty_with_error() {
    let blob = Arc::new(MemoryBlobStore::with_value(DEFAULT_KEY, "not json at all"));
    let persistence = ListPersistence::new(blob, DEFAULT_KEY);

    let outcome = persistence.load().await;

    assert!(outcome.lists.is_empty());
    assert!(matches!(outcome.error, Some(PersistError::Parse { .. })));
}

#[tokio::test]
async fn save_fully_overwrites_previous_value() {
    let blob = Arc::new(MemoryBlobStore::new());
    let persistence = ListPersistence::new(blob.clone(), DEFAULT_KEY);

    persistence.save(&common::sample_lists()).await.unwrap();
    persistence.save(&[]).await.unwrap();

    assert_eq!(blob.value(DEFAULT_KEY).as_deref(), Some("[]"));
    assert!(persistence.try_load().await.unwrap().is_empty());
}

#[tokio::test]
async fn stored_json_uses_plain_field_names() {
    let blob = Arc::new(MemoryBlobStore::new());
    let persistence = ListPersistence::new(blob.clone(), DEFAULT_KEY);

    persistence.save(&common::sample_lists()).await.unwrap();

    let raw = blob.get(DEFAULT_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let item = &value[0]["items"][1];
    assert_eq!(value[0]["name"], "Groceries");
    assert_eq!(item["name"], "Bread");
    assert_eq!(item["quantity"], "1");
    assert_eq!(item["purchased"], true);
}

#[tokio::test]
async fn store_failure_is_reported_by_save() {
    let blob = Arc::new(MemoryBlobStore::new());
    blob.set_fail_writes(true);
    let persistence = ListPersistence::new(blob, DEFAULT_KEY);

    let result = persistence.save(&common::sample_lists()).await;

    assert!(matches!(result, Err(PersistError::Blob(_))));
}

#[tokio::test]
async fn keys_are_independent() {
    let blob: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());
    let home = ListPersistence::new(blob.clone(), "home");
    let work = ListPersistence::new(blob, "work");

    home.save(&common::sample_lists()).await.unwrap();

    assert!(work.try_load().await.unwrap().is_empty());
    assert_eq!(home.try_load().await.unwrap().len(), 2);
}
