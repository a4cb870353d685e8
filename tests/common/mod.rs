//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use shoplist::persist::{ListPersistence, MemoryBlobStore, PersistWriter, DEFAULT_KEY};
use shoplist::shopping::{Item, ShoppingList};
use shoplist::store::ListStore;
use tokio::task::JoinHandle;

/// A store wired to an in-memory blob store through a real writer task.
pub fn store_with_memory_blob() -> (ListStore, Arc<MemoryBlobStore>, JoinHandle<()>) {
    let blob = Arc::new(MemoryBlobStore::new());
    let persistence = ListPersistence::new(blob.clone(), DEFAULT_KEY);
    let (saver, task) = PersistWriter::spawn(persistence);
    (ListStore::with_saver(saver), blob, task)
}

/// Wait for all queued saves of `store`.
pub async fn flush(store: &ListStore) {
    store
        .saver()
        .expect("store has no saver attached")
        .flush()
        .await
        .expect("flush failed");
}

/// Two lists, the first with two items (one purchased).
pub fn sample_lists() -> Vec<ShoppingList> {
    let mut groceries = ShoppingList::new("1700000000000", "Groceries");
    groceries.items.push(Item::new("1700000000001", "Milk", "2"));
    let mut bread = Item::new("1700000000002", "Bread", "1");
    bread.purchased = true;
    groceries.items.push(bread);

    let hardware = ShoppingList::new("1700000000003", "Hardware");
    vec![groceries, hardware]
}
