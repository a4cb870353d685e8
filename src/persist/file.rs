//! File-backed blob store.
//!
//! Each key maps to `{dir}/{key}.json`. Writes go to a temp file that is
//! renamed over the target, so a crash mid-write leaves the previous value
//! intact. An advisory lock on `{key}.lock` keeps two processes from
//! interleaving writes to the same key.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;

use crate::persist::blob::BlobStore;
use crate::persist::error::BlobError;

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so they must stay inside the data directory.
    pub fn validate_key(key: &str) -> Result<(), BlobError> {
        let invalid = key.trim().is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\'])
            || key.contains('\0');
        if invalid {
            return Err(BlobError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, BlobError> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobError::io(path, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        let dir = self.dir.clone();
        let lock_path = dir.join(format!("{key}.lock"));

        tokio::task::spawn_blocking(move || write_locked(&dir, &lock_path, &path, &value))
            .await
            .map_err(|e| BlobError::io(&self.dir, std::io::Error::other(e)))?
    }
}

fn write_locked(dir: &Path, lock_path: &Path, path: &Path, value: &str) -> Result<(), BlobError> {
    fs::create_dir_all(dir).map_err(|e| BlobError::io(dir, e))?;

    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(|e| BlobError::io(lock_path, e))?;
    lock.lock_exclusive().map_err(|e| BlobError::Lock {
        path: lock_path.to_path_buf(),
        source: e,
    })?;

    // Released when `lock` is dropped.
    let result = write_atomic(path, value);
    drop(lock);
    result
}

fn write_atomic(path: &Path, value: &str) -> Result<(), BlobError> {
    let temp_path = path.with_extension("json.tmp");

    let mut file = File::create(&temp_path).map_err(|e| BlobError::io(&temp_path, e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| BlobError::io(&temp_path, e))?;
    file.sync_all().map_err(|e| BlobError::io(&temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| BlobError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp_dir.path());
        assert!(store.get("shoppingLists").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_creates_directory_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp_dir.path().join("nested").join("data"));

        store.set("k", "first".to_string()).await.unwrap();
        store.set("k", "second".to_string()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
        assert!(!store.path_for("k").unwrap().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn keys_with_separators_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp_dir.path());

        for key in ["", " ", "..", "a/b", "a\\b", "lists\0x"] {
            assert!(matches!(
                store.set(key, "x".to_string()).await,
                Err(BlobError::InvalidKey { .. })
            ));
        }
    }

    #[tokio::test]
    async fn lock_is_released_between_writers() {
        let temp_dir = TempDir::new().unwrap();
        let first = FileBlobStore::new(temp_dir.path());
        let second = FileBlobStore::new(temp_dir.path());

        for round in 0..5 {
            let (a, b) = tokio::join!(
                first.set("k", format!("a{round}")),
                second.set("k", format!("b{round}"))
            );
            a.unwrap();
            b.unwrap();
        }

        let value = first.get("k").await.unwrap().unwrap();
        assert!(value == "a4" || value == "b4");
    }
}
