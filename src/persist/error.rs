use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::shopping::ValidationError;

/// Failures of the underlying key-value store.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid blob key '{key}'")]
    InvalidKey { key: String },
}

impl BlobError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading or saving the list collection.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error("Failed to serialize shopping lists: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Stored value under '{key}' is not valid shopping-list JSON: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored value under '{key}' is inconsistent: {source}")]
    Invalid {
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Persistence writer has stopped")]
    WriterClosed,

    /// A save attempted by the background writer failed.
    #[error("Save failed: {source}")]
    SaveFailed {
        #[source]
        source: Arc<PersistError>,
    },
}
