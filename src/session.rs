//! Startup wiring: load once, initialize the store, start the writer.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::persist::{BlobStore, ListPersistence, PersistError, PersistWriter};
use crate::store::ListStore;

/// A running store with its background writer.
pub struct Session {
    store: ListStore,
    writer: JoinHandle<()>,
    load_error: Option<PersistError>,
}

impl Session {
    /// Load the stored collection and start persisting mutations.
    ///
    /// Unreadable stored data is not fatal: the session starts empty and
    /// the error is kept in [`Session::load_error`]. Must be called from
    /// within a tokio runtime.
    pub async fn open(blob: Arc<dyn BlobStore>, key: &str) -> Self {
        let persistence = ListPersistence::new(blob, key);
        let outcome = persistence.load().await;

        let mut store = ListStore::new();
        if let Err(e) = store.initialize(outcome.lists) {
            tracing::warn!(error = %e, "Stored lists rejected; starting empty");
        }

        let (saver, writer) = PersistWriter::spawn(persistence);
        store.attach_saver(saver);
        tracing::info!(key, lists = store.lists().len(), "Shopping list session opened");

        Self {
            store,
            writer,
            load_error: outcome.error,
        }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ListStore {
        &mut self.store
    }

    /// Why the stored data was discarded at startup, if it was.
    pub fn load_error(&self) -> Option<&PersistError> {
        self.load_error.as_ref()
    }

    /// Wait for every queued save to be attempted.
    pub async fn flush(&self) -> Result<(), PersistError> {
        match self.store.saver() {
            Some(saver) => saver.flush().await,
            None => Ok(()),
        }
    }

    /// Flush pending saves and stop the writer.
    pub async fn close(self) -> Result<(), PersistError> {
        let result = self.flush().await;
        let Self { store, writer, .. } = self;
        drop(store);
        if let Err(e) = writer.await {
            tracing::warn!(error = %e, "Persistence writer task failed");
        }
        result
    }
}
