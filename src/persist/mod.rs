//! Persistence of the list collection.
//!
//! [`BlobStore`] is the opaque key-value primitive, [`ListPersistence`]
//! adds typed JSON load/save on top of it, and [`PersistWriter`] runs the
//! queued background saves the list store triggers after each mutation.

mod adapter;
mod blob;
mod error;
mod file;
mod memory;
mod writer;

pub use adapter::{ListPersistence, LoadOutcome, DEFAULT_KEY};
pub use blob::BlobStore;
pub use error::{BlobError, PersistError};
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use writer::{PersistWriter, SaveHandle, SaveStatus};
