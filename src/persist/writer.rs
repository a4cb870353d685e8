//! Single-flight background writer.
//!
//! The store hands every post-mutation snapshot to a [`SaveHandle`]. One
//! writer task owns the [`ListPersistence`] and saves at most one snapshot
//! at a time. Snapshots submitted while a save is running overwrite each
//! other in a `watch` slot, so the writer always picks up the newest one
//! next and the final mutation is the one that ends up on disk.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::persist::adapter::ListPersistence;
use crate::persist::error::PersistError;
use crate::shopping::ShoppingList;

#[derive(Debug, Clone, Default)]
struct Snapshot {
    generation: u64,
    lists: Arc<Vec<ShoppingList>>,
}

/// Progress of the writer, observable from any handle.
#[derive(Debug, Clone, Default)]
pub struct SaveStatus {
    /// Newest generation the writer has tried to save.
    pub attempted: u64,
    /// Newest generation that was saved successfully.
    pub saved: u64,
    /// Error of the most recent attempt, cleared by the next success.
    pub last_error: Option<Arc<PersistError>>,
}

/// Submits snapshots to the writer task.
#[derive(Clone)]
pub struct SaveHandle {
    pending: Arc<watch::Sender<Snapshot>>,
    status: watch::Receiver<SaveStatus>,
}

impl SaveHandle {
    /// Queue the full collection for saving and return its generation.
    ///
    /// Never blocks and never fails; if the writer is gone the snapshot is
    /// dropped and the next `flush` reports it.
    pub fn submit(&self, lists: Vec<ShoppingList>) -> u64 {
        let mut generation = 0;
        self.pending.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.lists = Arc::new(lists);
            generation = snapshot.generation;
        });
        tracing::trace!(generation, "Snapshot queued for saving");
        generation
    }

    /// Generation of the newest submitted snapshot (0 if none).
    pub fn submitted(&self) -> u64 {
        self.pending.borrow().generation
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    /// Wait until every snapshot submitted so far has been attempted.
    ///
    /// If the newest snapshot already failed to save, it is queued again
    /// first, so a flush after the store recovers makes it durable. Returns
    /// the error of the last attempt when the newest snapshot still could
    /// not be saved.
    pub async fn flush(&self) -> Result<(), PersistError> {
        let target = self.retry_failed().unwrap_or_else(|| self.submitted());
        let mut status = self.status.clone();
        let (saved, last_error) = {
            let current = status
                .wait_for(|s| s.attempted >= target)
                .await
                .map_err(|_| PersistError::WriterClosed)?;
            (current.saved, current.last_error.clone())
        };

        match last_error {
            Some(source) if saved < target => Err(PersistError::SaveFailed { source }),
            _ => Ok(()),
        }
    }

    /// Resubmit the newest snapshot when its save was attempted and failed.
    fn retry_failed(&self) -> Option<u64> {
        let failed = {
            let status = self.status.borrow();
            let submitted = self.submitted();
            submitted > 0
                && status.attempted >= submitted
                && status.saved < submitted
                && status.last_error.is_some()
        };
        if !failed {
            return None;
        }

        let mut generation = 0;
        self.pending.send_modify(|snapshot| {
            snapshot.generation += 1;
            generation = snapshot.generation;
        });
        tracing::debug!(generation, "Retrying failed save");
        Some(generation)
    }
}

pub struct PersistWriter;

impl PersistWriter {
    /// Spawn the writer on the current tokio runtime.
    ///
    /// The task exits once every [`SaveHandle`] clone has been dropped and
    /// the last pending snapshot has been attempted.
    pub fn spawn(persistence: ListPersistence) -> (SaveHandle, JoinHandle<()>) {
        let (pending_tx, pending_rx) = watch::channel(Snapshot::default());
        let (status_tx, status_rx) = watch::channel(SaveStatus::default());

        let task = tokio::spawn(run(persistence, pending_rx, status_tx));
        let handle = SaveHandle {
            pending: Arc::new(pending_tx),
            status: status_rx,
        };
        (handle, task)
    }
}

async fn run(
    persistence: ListPersistence,
    mut pending: watch::Receiver<Snapshot>,
    status: watch::Sender<SaveStatus>,
) {
    while pending.changed().await.is_ok() {
        let snapshot = pending.borrow_and_update().clone();
        let result = persistence.save(&snapshot.lists).await;

        match &result {
            Ok(()) => tracing::debug!(
                key = %persistence.key(),
                generation = snapshot.generation,
                lists = snapshot.lists.len(),
                "Shopping lists saved"
            ),
            Err(e) => tracing::warn!(
                key = %persistence.key(),
                generation = snapshot.generation,
                error = %e,
                "Failed to save shopping lists; in-memory state kept"
            ),
        }

        status.send_modify(|s| {
            s.attempted = snapshot.generation;
            match result {
                Ok(()) => {
                    s.saved = snapshot.generation;
                    s.last_error = None;
                }
                Err(e) => s.last_error = Some(Arc::new(e)),
            }
        });
    }
    tracing::debug!(key = %persistence.key(), "Persistence writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryBlobStore, DEFAULT_KEY};

    fn lists(names: &[&str]) -> Vec<ShoppingList> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ShoppingList::new(i.to_string(), *name))
            .collect()
    }

    #[tokio::test]
    async fn flush_with_nothing_submitted_returns_immediately() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (handle, _task) = PersistWriter::spawn(ListPersistence::new(blob.clone(), DEFAULT_KEY));

        handle.flush().await.unwrap();
        assert_eq!(blob.writes(), 0);
    }

    #[tokio::test]
    async fn latest_snapshot_wins() {
        let blob = Arc::new(MemoryBlobStore::new());
        let persistence = ListPersistence::new(blob.clone(), DEFAULT_KEY);
        let (handle, _task) = PersistWriter::spawn(persistence.clone());

        for n in 1..=20 {
            let names: Vec<String> = (0..n).map(|i| format!("List {i}")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            handle.submit(lists(&names));
        }
        handle.flush().await.unwrap();

        assert_eq!(persistence.try_load().await.unwrap().len(), 20);
        assert!(blob.writes() <= 20);
        assert_eq!(handle.status().saved, 20);
    }

    #[tokio::test]
    async fn failed_save_is_reported_and_recovers() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (handle, _task) = PersistWriter::spawn(ListPersistence::new(blob.clone(), DEFAULT_KEY));

        blob.set_fail_writes(true);
        handle.submit(lists(&["Groceries"]));
        assert!(matches!(
            handle.flush().await,
            Err(PersistError::SaveFailed { .. })
        ));
        assert!(handle.status().last_error.is_some());

        blob.set_fail_writes(false);
        handle.submit(lists(&["Groceries"]));
        handle.flush().await.unwrap();
        assert!(handle.status().last_error.is_none());
        assert!(blob.value(DEFAULT_KEY).is_some());
    }

    #[tokio::test]
    async fn flush_retries_newest_failed_snapshot() {
        let blob = Arc::new(MemoryBlobStore::new());
        let persistence = ListPersistence::new(blob.clone(), DEFAULT_KEY);
        let (handle, _task) = PersistWriter::spawn(persistence.clone());

        blob.set_fail_writes(true);
        handle.submit(lists(&["Groceries", "Hardware"]));
        assert!(handle.flush().await.is_err());
        assert!(blob.value(DEFAULT_KEY).is_none());

        blob.set_fail_writes(false);
        handle.flush().await.unwrap();

        let saved = persistence.try_load().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].name, "Hardware");
        assert!(handle.status().last_error.is_none());
        assert_eq!(handle.status().saved, handle.submitted());
    }

    #[tokio::test]
    async fn save_failure_keeps_its_cause() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (handle, _task) = PersistWriter::spawn(ListPersistence::new(blob.clone(), DEFAULT_KEY));

        blob.set_fail_writes(true);
        handle.submit(lists(&["Groceries"]));
        let err = handle.flush().await.unwrap_err();

        let PersistError::SaveFailed { source } = &err else {
            panic!("expected SaveFailed, got {err:?}");
        };
        assert!(matches!(source.as_ref(), PersistError::Blob(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn writer_exits_after_last_handle_dropped() {
        let blob = Arc::new(MemoryBlobStore::new());
        let (handle, task) = PersistWriter::spawn(ListPersistence::new(blob.clone(), DEFAULT_KEY));

        handle.submit(lists(&["Groceries"]));
        drop(handle);
        task.await.unwrap();

        assert_eq!(blob.writes(), 1);
    }
}
